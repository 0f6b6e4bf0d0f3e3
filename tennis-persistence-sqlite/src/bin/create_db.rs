use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tennis_persistence_sqlite::players::SqlitePlayerRepository;
use tennis_server_domain::player::{
    ArcPlayerRepository, PlayerService, PlayerServiceImpl, PlayerToSave,
};

const SEED_PLAYERS: [(&str, &str, &str, u32); 4] = [
    ("Sinner", "Jannik", "2001-08-16", 9500),
    ("Alcaraz", "Carlos", "2003-05-05", 8500),
    ("Djokovic", "Novak", "1987-05-22", 4000),
    ("Nadal", "Rafael", "1986-06-03", 2000),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let players_db_sql = "CREATE TABLE players (id INTEGER PRIMARY KEY, last_name TEXT NOT NULL COLLATE NOCASE UNIQUE, first_name TEXT NOT NULL, birth_date DATE NOT NULL, points INT NOT NULL DEFAULT 0, position INT NOT NULL);";

    let players_db_path =
        std::env::var("TENNIS_PLAYER_DB").expect("TENNIS_PLAYER_DB env var not set");
    let parent = std::path::Path::new(&players_db_path)
        .parent()
        .expect("Failed to get parent directory of players DB path");
    if !parent.exists() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory for players DB");
        println!(
            "Created parent directory for players DB at {}",
            parent.display()
        );
    }

    if std::path::Path::new(&players_db_path).exists() {
        std::fs::remove_file(&players_db_path).expect("Failed to remove existing players DB");
        println!("Removed existing players DB at {}", players_db_path);
    }

    let connect_options = SqliteConnectOptions::new()
        .filename(&players_db_path)
        .create_if_missing(true);
    let conn = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .expect("Failed to create DB pool");
    sqlx::query(players_db_sql)
        .execute(&conn)
        .await
        .expect("Failed to create players table");

    println!("Created new players DB at {}", players_db_path);

    let repository: ArcPlayerRepository = Arc::new(Box::new(SqlitePlayerRepository::new()));
    let service = PlayerServiceImpl::new(repository);

    for (last_name, first_name, birth_date, points) in SEED_PLAYERS {
        let player = service
            .create(PlayerToSave {
                last_name: last_name.to_string(),
                first_name: first_name.to_string(),
                birth_date: NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
                    .expect("Invalid seed birth date"),
                points,
            })
            .await
            .expect("Failed to seed player");
        println!(
            "Seeded player [{}] with [{}] points at position [{}]",
            player.last_name, player.rank.points, player.rank.position
        );
    }
}
