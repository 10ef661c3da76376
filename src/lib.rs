pub mod aggregation;
pub mod championship;
pub mod fake_season;
pub mod match_record;
pub mod record_store;
pub mod season_csv;
pub mod settings;
pub mod standings;
