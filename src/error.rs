use thiserror::Error;

// ---------------------------------------------------------------------------
// Per-file skip reasons
// ---------------------------------------------------------------------------

/// Why a single input file produced no chart.
///
/// None of these are fatal: the pipeline logs a warning and moves on to the
/// next file.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("could not read file: {0}")]
    Read(#[from] csv::Error),

    #[error("expected exactly 2 columns, found {found}")]
    ColumnCount { found: usize },

    #[error("not enough data after outlier removal ({found} valid rows, need at least {required})")]
    TooFewRows { found: usize, required: usize },

    #[error("title '{title}' must include '{group_a}' or '{group_b}' for grouping")]
    Ungrouped {
        title: String,
        group_a: String,
        group_b: String,
    },
}
