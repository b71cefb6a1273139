pub mod player_repo;
