//! Aggregate run report.
//!
//! Collects the per-stage reports of one full pipeline run so they can be
//! written as JSON for build tooling (`run --report <path>`).

use serde::Serialize;

use crate::archive::ArchiveReport;
use crate::promote::PromoteReport;
use crate::prune::PruneReport;
use crate::rewrite::RewriteReport;
use crate::verify::VerifyReport;

/// Everything one full run did, stage by stage.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub archive: ArchiveReport,
    pub promote: PromoteReport,
    pub rewrite: RewriteReport,
    pub prune: PruneReport,
    pub verify: VerifyReport,
}
