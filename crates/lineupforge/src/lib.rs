//! LineupForge - exposure-capped lineup optimization
//!
//! Loads a pool of priced, projected entrants, enumerates every lineup of K
//! entrants inside a salary band, ranks them by total projection and keeps
//! the best M whose entrants and entrant groups stay under their exposure
//! caps.
//!
//! # Example
//!
//! ```
//! use lineupforge::prelude::*;
//!
//! let pool = EntrantPool::new(vec![
//!     Entrant::new("a", 20, 9.0, 1.0),
//!     Entrant::new("b", 30, 8.0, 1.0),
//!     Entrant::new("c", 40, 7.0, 1.0),
//!     Entrant::new("d", 50, 6.0, 1.0),
//! ]).unwrap();
//!
//! let config = OptimizerConfig::new()
//!     .with_lineup_size(2)
//!     .with_max_lineups(3)
//!     .with_salary_range(0, 80);
//!
//! let optimization = optimize(&pool, &config).unwrap();
//! assert_eq!(optimization.lineups.len(), 3);
//! assert_eq!(optimization.lineups[0].total_projection(), 17.0);
//! ```

mod error;
mod optimizer;

pub use error::{ForgeError, Result};
pub use optimizer::{optimize, run_optimizer, Optimization, RunSummary};

pub use lineupforge_config as config;
pub use lineupforge_solver as solver;

#[cfg(feature = "console")]
pub use lineupforge_console as console;

pub mod prelude {
    pub use super::{optimize, run_optimizer, ForgeError, Optimization, RunSummary};
    pub use lineupforge_config::{
        EnumerationConfig, ExposureMode, FilterField, OptimizerConfig, RunConfig, ThreadCount,
    };
    pub use lineupforge_core::{Entrant, EntrantPool, Lineup, Outcome};
    pub use lineupforge_io::{EntrantLoader, LineupRecord, LineupWriter};
    pub use lineupforge_solver::{
        DiversifyConfig, ExposureDiversifier, ExposureMap, LineupConstraints, LineupEnumerator,
    };
}
