//! SQL DDL for initializing the question storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// Name of the CHECK constraint that rejects case-insensitively equal options.
/// Violations are reported back as `PollError::DuplicateOptions`.
pub const DISTINCT_OPTIONS_CONSTRAINT: &str = "distinct_options";

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - vote counters that start at 0 and cannot go negative
/// - `is_flagged` BOOLEAN (stored as INTEGER 0/1)
/// - partial index over unflagged rows for random selection
///
/// `lower()` only folds ASCII in SQLite; full Unicode folding happens in the validator.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    option_a TEXT NOT NULL,
    option_b TEXT NOT NULL,
    option_a_votes INTEGER NOT NULL DEFAULT 0 CHECK (option_a_votes >= 0),
    option_b_votes INTEGER NOT NULL DEFAULT 0 CHECK (option_b_votes >= 0),
    is_flagged INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    CONSTRAINT option_text_length CHECK (
        length(option_a) BETWEEN 1 AND 500 AND length(option_b) BETWEEN 1 AND 500
    ),
    CONSTRAINT distinct_options CHECK (lower(trim(option_a)) <> lower(trim(option_b)))
);

CREATE INDEX IF NOT EXISTS idx_questions_unflagged ON questions(id) WHERE is_flagged = 0;
"#;
