use std::sync::Arc;

use chrono::NaiveDate;
use tennis_persistence_sqlite::players::SqlitePlayerRepository;
use tennis_server_domain::player::{
    ArcPlayerRepository, PlayerService, PlayerServiceImpl, PlayerToSave,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        eprintln!("Usage: add_player <last_name> <first_name> <birth_date> <points>");
        std::process::exit(1);
    }

    let last_name = &args[1];
    let first_name = &args[2];
    let birth_date = NaiveDate::parse_from_str(&args[3], "%Y-%m-%d")
        .expect("birth_date must be formatted as YYYY-MM-DD");
    let points: u32 = args[4].parse().expect("points must be a non-negative integer");

    let repository: ArcPlayerRepository = Arc::new(Box::new(SqlitePlayerRepository::new()));
    let service = PlayerServiceImpl::new(repository);

    let player = match service
        .create(PlayerToSave {
            last_name: last_name.clone(),
            first_name: first_name.clone(),
            birth_date,
            points,
        })
        .await
    {
        Ok(player) => player,
        Err(e) => panic!("Failed to create player [{}]: {}", last_name, e),
    };

    println!(
        "Created player [{} {}] with [{}] points at position [{}]",
        player.first_name, player.last_name, player.rank.points, player.rank.position
    );
}
