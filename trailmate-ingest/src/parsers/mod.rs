pub mod leaderboard_csv;
pub mod trek_csv;
