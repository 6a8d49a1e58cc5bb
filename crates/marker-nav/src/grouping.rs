//! Clustering of marker samples into rows.

use log::debug;
use marker_nav_core::{MarkerSample, Row, RowGroupingParams, MARKERS_PER_ROW};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Clusters a frame's marker samples into rows of [`MARKERS_PER_ROW`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RowGrouper {
    params: RowGroupingParams,
}

impl RowGrouper {
    pub fn new(params: RowGroupingParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &RowGroupingParams {
        &self.params
    }

    /// Sort samples by x (ties by id) and sweep them into rows.
    ///
    /// A sample joins the current cluster when its horizontal gap to the
    /// cluster's last member lies inside the spacing window; otherwise the
    /// cluster is closed and a new one starts at the sample. Only clusters of
    /// exactly [`MARKERS_PER_ROW`] members are emitted, in completion order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, samples), fields(samples = samples.len()))
    )]
    pub fn group(&self, samples: &[MarkerSample]) -> Vec<Row> {
        if samples.is_empty() {
            return Vec::new();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by_key(|s| (s.x(), s.id));

        let mut rows = Vec::new();
        let mut cluster: Vec<MarkerSample> = Vec::with_capacity(MARKERS_PER_ROW);

        for sample in sorted {
            let Some(last) = cluster.last() else {
                cluster.push(sample);
                continue;
            };

            let distance_x = (i64::from(sample.x()) - i64::from(last.x())).abs();
            if self.params.accepts(distance_x) {
                cluster.push(sample);
            } else {
                close_cluster(std::mem::take(&mut cluster), &mut rows);
                cluster.push(sample);
            }
        }
        close_cluster(cluster, &mut rows);

        rows
    }
}

/// Group with an ad-hoc spacing window.
pub fn group_rows(samples: &[MarkerSample], params: RowGroupingParams) -> Vec<Row> {
    RowGrouper::new(params).group(samples)
}

fn close_cluster(cluster: Vec<MarkerSample>, rows: &mut Vec<Row>) {
    let len = cluster.len();
    if len != MARKERS_PER_ROW {
        if len > 0 {
            debug!(
                "dropping cluster of {len} marker(s) starting at x={}",
                cluster[0].x()
            );
        }
        return;
    }
    match Row::try_from(cluster) {
        Ok(row) => rows.push(row),
        Err(err) => debug!("dropping cluster: {err}"),
    }
}
