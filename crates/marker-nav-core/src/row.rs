use serde::Serialize;

use crate::MarkerSample;

/// Number of markers that make up one physical row (a gate line).
pub const MARKERS_PER_ROW: usize = 4;

/// Reasons a set of samples cannot form a [`Row`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("a row needs exactly {expected} markers, got {got}")]
    WrongLength { expected: usize, got: usize },
    #[error("row members must be ordered by ascending x (marker {id} at x={x} follows x={prev_x})")]
    Unordered { id: u32, x: i32, prev_x: i32 },
}

/// Exactly [`MARKERS_PER_ROW`] samples ordered by ascending x.
///
/// Rows produced by the grouper also satisfy the spacing window between
/// consecutive members; rows built through `TryFrom` only check count and
/// ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    members: [MarkerSample; MARKERS_PER_ROW],
}

impl Row {
    #[inline]
    pub fn members(&self) -> &[MarkerSample; MARKERS_PER_ROW] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerSample> {
        self.members.iter()
    }

    /// Marker ids in row order.
    pub fn ids(&self) -> [u32; MARKERS_PER_ROW] {
        self.members.map(|m| m.id)
    }

    #[inline]
    pub fn first(&self) -> &MarkerSample {
        &self.members[0]
    }

    #[inline]
    pub fn last(&self) -> &MarkerSample {
        &self.members[MARKERS_PER_ROW - 1]
    }
}

impl TryFrom<Vec<MarkerSample>> for Row {
    type Error = RowError;

    fn try_from(samples: Vec<MarkerSample>) -> Result<Self, Self::Error> {
        let got = samples.len();
        let members: [MarkerSample; MARKERS_PER_ROW] =
            samples.try_into().map_err(|_| RowError::WrongLength {
                expected: MARKERS_PER_ROW,
                got,
            })?;

        for pair in members.windows(2) {
            if pair[1].x() < pair[0].x() {
                return Err(RowError::Unordered {
                    id: pair[1].id,
                    x: pair[1].x(),
                    prev_x: pair[0].x(),
                });
            }
        }

        Ok(Self { members })
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a MarkerSample;
    type IntoIter = std::slice::Iter<'a, MarkerSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(xs: &[i32]) -> Vec<MarkerSample> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| MarkerSample::new(i as u32, x, 100))
            .collect()
    }

    #[test]
    fn accepts_four_ordered_samples() {
        let row = Row::try_from(samples(&[10, 40, 40, 90])).expect("row");
        assert_eq!(row.ids(), [0, 1, 2, 3]);
        assert_eq!(row.first().x(), 10);
        assert_eq!(row.last().x(), 90);
    }

    #[test]
    fn rejects_wrong_member_count() {
        let err = Row::try_from(samples(&[10, 40, 70])).unwrap_err();
        assert_eq!(
            err,
            RowError::WrongLength {
                expected: 4,
                got: 3
            }
        );
        assert!(Row::try_from(samples(&[1, 2, 3, 4, 5])).is_err());
    }

    #[test]
    fn rejects_unordered_samples() {
        let err = Row::try_from(samples(&[10, 50, 30, 90])).unwrap_err();
        assert_eq!(
            err,
            RowError::Unordered {
                id: 2,
                x: 30,
                prev_x: 50
            }
        );
    }
}
