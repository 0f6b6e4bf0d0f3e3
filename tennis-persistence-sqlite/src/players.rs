use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};
use tennis_server_domain::{
    ServiceError, ServiceResult,
    player::{Player, PlayerRepository, Rank},
};

use crate::create_player_db_pool;

pub struct SqlitePlayerRepository {
    pool: Pool<Sqlite>,
}

impl SqlitePlayerRepository {
    pub fn new() -> Self {
        let pool = create_player_db_pool();
        Self { pool }
    }

    fn player_from_row(row: &SqliteRow) -> sqlx::Result<Player> {
        Ok(Player {
            last_name: row.try_get("last_name")?,
            first_name: row.try_get("first_name")?,
            birth_date: row.try_get("birth_date")?,
            rank: Rank {
                position: row.try_get("position")?,
                points: row.try_get("points")?,
            },
        })
    }
}

impl Default for SqlitePlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn find_all(&self) -> ServiceResult<Vec<Player>> {
        // id order keeps ranking ties stable across rewrites
        let rows = sqlx::query("SELECT * FROM players ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ServiceError::DataAccess(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Self::player_from_row(row).map_err(|e| ServiceError::DataAccess(e.to_string()))
            })
            .collect::<ServiceResult<Vec<Player>>>()
    }

    async fn find_one_by_last_name_ignore_case(
        &self,
        last_name: &str,
    ) -> ServiceResult<Option<Player>> {
        let row = sqlx::query("SELECT * FROM players WHERE last_name = ? COLLATE NOCASE")
            .bind(last_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ServiceError::DataAccess(e.to_string()))?;
        match row {
            Some(row) => Self::player_from_row(&row)
                .map(Some)
                .map_err(|e| ServiceError::DataAccess(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, player: &Player) -> ServiceResult<Player> {
        sqlx::query(
            "INSERT INTO players (last_name, first_name, birth_date, points, position) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(last_name) DO UPDATE SET \
             first_name = excluded.first_name, \
             birth_date = excluded.birth_date, \
             points = excluded.points, \
             position = excluded.position",
        )
        .bind(&player.last_name)
        .bind(&player.first_name)
        .bind(player.birth_date)
        .bind(player.rank.points)
        .bind(player.rank.position)
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::DataAccess(e.to_string()))?;

        match self
            .find_one_by_last_name_ignore_case(&player.last_name)
            .await?
        {
            Some(saved) => Ok(saved),
            None => ServiceError::data_access(format!(
                "Player '{}' missing after save",
                player.last_name
            )),
        }
    }

    async fn save_all(&self, players: &[Player]) -> ServiceResult<()> {
        for player in players {
            self.save(player).await?;
        }
        Ok(())
    }

    async fn delete(&self, player: &Player) -> ServiceResult<()> {
        sqlx::query("DELETE FROM players WHERE last_name = ? COLLATE NOCASE")
            .bind(&player.last_name)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::DataAccess(e.to_string()))?;
        Ok(())
    }
}
