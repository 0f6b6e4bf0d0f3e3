use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    ServiceError, ServiceResult,
    health::HealthCheckRepository,
    ranking::compute_ranking,
};

pub type PlayerLastName = String;

/// Placeholder position carried by a freshly inserted player until the
/// ranking has been recomputed over the full roster.
pub const UNRANKED_POSITION: u32 = 999_999_999;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rank {
    pub position: u32,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub last_name: PlayerLastName,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub rank: Rank,
}

/// Mutation payload. Carries no position: positions are always derived.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct PlayerToSave {
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub points: u32,
}

pub type ArcPlayerRepository = Arc<Box<dyn PlayerRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait PlayerRepository {
    async fn find_all(&self) -> ServiceResult<Vec<Player>>;
    async fn find_one_by_last_name_ignore_case(
        &self,
        last_name: &str,
    ) -> ServiceResult<Option<Player>>;
    async fn save(&self, player: &Player) -> ServiceResult<Player>;
    async fn save_all(&self, players: &[Player]) -> ServiceResult<()>;
    async fn delete(&self, player: &Player) -> ServiceResult<()>;
}

pub type ArcPlayerService = Arc<Box<dyn PlayerService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait PlayerService {
    async fn get_all_players(&self) -> ServiceResult<Vec<Player>>;
    async fn get_by_last_name(&self, last_name: &str) -> ServiceResult<Player>;
    async fn create(&self, to_save: PlayerToSave) -> ServiceResult<Player>;
    async fn update(&self, to_save: PlayerToSave) -> ServiceResult<Player>;
    async fn delete(&self, last_name: &str) -> ServiceResult<()>;
}

pub struct PlayerServiceImpl {
    player_repository: ArcPlayerRepository,
}

impl PlayerServiceImpl {
    pub fn new(player_repository: ArcPlayerRepository) -> Self {
        Self { player_repository }
    }

    fn validate_player(to_save: &PlayerToSave) -> ServiceResult<()> {
        if let Err(e) = to_save.validate() {
            return ServiceError::bad_request(format!("Invalid player: {}", e));
        }
        Ok(())
    }

    /// Rewrites every player's position from the full roster.
    async fn rewrite_ranking(&self) -> ServiceResult<()> {
        let players = self.player_repository.find_all().await?;
        let new_ranking = compute_ranking(players);
        self.player_repository.save_all(&new_ranking).await
    }
}

#[async_trait::async_trait]
impl PlayerService for PlayerServiceImpl {
    async fn get_all_players(&self) -> ServiceResult<Vec<Player>> {
        let mut players = self.player_repository.find_all().await?;
        players.sort_by_key(|player| player.rank.position);
        Ok(players)
    }

    async fn get_by_last_name(&self, last_name: &str) -> ServiceResult<Player> {
        let player = self
            .player_repository
            .find_one_by_last_name_ignore_case(last_name)
            .await?;
        match player {
            Some(player) => Ok(player),
            None => ServiceError::not_found(format!("Player '{}' not found", last_name)),
        }
    }

    async fn create(&self, to_save: PlayerToSave) -> ServiceResult<Player> {
        Self::validate_player(&to_save)?;
        let existing = self
            .player_repository
            .find_one_by_last_name_ignore_case(&to_save.last_name)
            .await?;
        if existing.is_some() {
            return ServiceError::already_exists(format!(
                "Player '{}' already exists",
                to_save.last_name
            ));
        }

        let player_to_register = Player {
            last_name: to_save.last_name,
            first_name: to_save.first_name,
            birth_date: to_save.birth_date,
            rank: Rank {
                position: UNRANKED_POSITION,
                points: to_save.points,
            },
        };
        let registered_player = self.player_repository.save(&player_to_register).await?;

        self.rewrite_ranking().await?;

        info!("Created player {}", registered_player.last_name);
        self.get_by_last_name(&registered_player.last_name).await
    }

    async fn update(&self, to_save: PlayerToSave) -> ServiceResult<Player> {
        Self::validate_player(&to_save)?;
        let Some(mut player_to_update) = self
            .player_repository
            .find_one_by_last_name_ignore_case(&to_save.last_name)
            .await?
        else {
            return ServiceError::not_found(format!("Player '{}' not found", to_save.last_name));
        };

        player_to_update.first_name = to_save.first_name;
        player_to_update.birth_date = to_save.birth_date;
        player_to_update.rank.points = to_save.points;
        let updated_player = self.player_repository.save(&player_to_update).await?;

        self.rewrite_ranking().await?;

        info!("Updated player {}", updated_player.last_name);
        self.get_by_last_name(&updated_player.last_name).await
    }

    async fn delete(&self, last_name: &str) -> ServiceResult<()> {
        let Some(player_to_delete) = self
            .player_repository
            .find_one_by_last_name_ignore_case(last_name)
            .await?
        else {
            return ServiceError::not_found(format!("Player '{}' not found", last_name));
        };

        self.player_repository.delete(&player_to_delete).await?;

        self.rewrite_ranking().await?;

        info!("Deleted player {}", player_to_delete.last_name);
        Ok(())
    }
}

/// DashMap-backed store keyed by lower-cased last name. Used by tests
/// and for running the server without a database file.
#[derive(Default)]
pub struct MemoryPlayerRepository {
    players: DashMap<PlayerLastName, (u32, Player)>,
    next_insertion_seq: std::sync::Mutex<u32>,
}

impl MemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn increment_insertion_seq(&self) -> u32 {
        let mut seq_lock = self
            .next_insertion_seq
            .lock()
            .expect("Failed to lock insertion seq mutex");
        let seq = *seq_lock;
        *seq_lock += 1;
        seq
    }
}

#[async_trait::async_trait]
impl PlayerRepository for MemoryPlayerRepository {
    async fn find_all(&self) -> ServiceResult<Vec<Player>> {
        let mut entries: Vec<(u32, Player)> = self
            .players
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        // insertion order, so ranking ties stay stable across rewrites
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, player)| player).collect())
    }

    async fn find_one_by_last_name_ignore_case(
        &self,
        last_name: &str,
    ) -> ServiceResult<Option<Player>> {
        Ok(self
            .players
            .get(&last_name.to_lowercase())
            .map(|entry| entry.value().1.clone()))
    }

    async fn save(&self, player: &Player) -> ServiceResult<Player> {
        let key = player.last_name.to_lowercase();
        let seq = match self.players.get(&key) {
            Some(entry) => entry.value().0,
            None => self.increment_insertion_seq(),
        };
        self.players.insert(key, (seq, player.clone()));
        Ok(player.clone())
    }

    async fn save_all(&self, players: &[Player]) -> ServiceResult<()> {
        for player in players {
            self.save(player).await?;
        }
        Ok(())
    }

    async fn delete(&self, player: &Player) -> ServiceResult<()> {
        self.players.remove(&player.last_name.to_lowercase());
        Ok(())
    }
}

#[async_trait::async_trait]
impl HealthCheckRepository for MemoryPlayerRepository {
    async fn count_connections(&self) -> ServiceResult<i64> {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_service() -> (ArcPlayerRepository, PlayerServiceImpl) {
        let repository: ArcPlayerRepository = Arc::new(Box::new(MemoryPlayerRepository::new()));
        let service = PlayerServiceImpl::new(repository.clone());
        (repository, service)
    }

    fn to_save(last_name: &str, points: u32) -> PlayerToSave {
        PlayerToSave {
            last_name: last_name.to_string(),
            first_name: "Test".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1992, 5, 20).unwrap(),
            points,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_, service) = player_service();

        let created = service
            .create(to_save("Swiatek", 9000))
            .await
            .expect("Failed to create player");
        assert_eq!(created.rank.position, 1);

        let fetched = service
            .get_by_last_name("Swiatek")
            .await
            .expect("Failed to fetch player");
        assert_eq!(fetched.rank.points, 9000);
        assert_eq!(fetched.rank.position, 1);
    }

    #[tokio::test]
    async fn test_get_by_last_name_is_case_insensitive() {
        let (_, service) = player_service();
        service
            .create(to_save("Alcaraz", 7000))
            .await
            .expect("Failed to create player");

        let fetched = service
            .get_by_last_name("ALCARAZ")
            .await
            .expect("Failed to fetch player");
        assert_eq!(fetched.last_name, "Alcaraz");
    }

    #[tokio::test]
    async fn test_get_missing_player_fails() {
        let (_, service) = player_service();
        assert!(matches!(
            service.get_by_last_name("Nobody").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_duplicate_fails_without_mutation() {
        let (repository, service) = player_service();
        service
            .create(to_save("Nadal", 5000))
            .await
            .expect("Failed to create player");

        let result = service.create(to_save("NADAL", 1)).await;
        assert!(matches!(result, Err(ServiceError::AlreadyExists(_))));

        let players = repository.find_all().await.expect("Failed to list players");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].rank.points, 5000);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_last_name() {
        let (_, service) = player_service();
        assert!(matches!(
            service.create(to_save("", 100)).await,
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_create_reranks_whole_roster() {
        let (_, service) = player_service();
        service.create(to_save("Almond", 100)).await.unwrap();
        service.create(to_save("Birch", 300)).await.unwrap();
        service.create(to_save("Cedar", 200)).await.unwrap();

        let players = service
            .get_all_players()
            .await
            .expect("Failed to list players");
        let summary: Vec<(&str, u32)> = players
            .iter()
            .map(|p| (p.last_name.as_str(), p.rank.position))
            .collect();
        assert_eq!(
            summary,
            vec![("Birch", 1), ("Cedar", 2), ("Almond", 3)]
        );
    }

    #[tokio::test]
    async fn test_update_rewrites_every_position() {
        let (_, service) = player_service();
        service.create(to_save("Leader", 1000)).await.unwrap();
        service.create(to_save("Chaser", 500)).await.unwrap();

        let updated = service
            .update(to_save("Chaser", 2000))
            .await
            .expect("Failed to update player");
        assert_eq!(updated.rank.position, 1);
        assert_eq!(updated.rank.points, 2000);

        let former_leader = service.get_by_last_name("Leader").await.unwrap();
        assert_eq!(former_leader.rank.position, 2);
    }

    #[tokio::test]
    async fn test_update_missing_player_fails() {
        let (_, service) = player_service();
        assert!(matches!(
            service.update(to_save("Ghost", 100)).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_only_player_empties_ranking() {
        let (_, service) = player_service();
        service.create(to_save("Solo", 800)).await.unwrap();

        service
            .delete("Solo")
            .await
            .expect("Failed to delete player");
        let players = service.get_all_players().await.unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_delete_reranks_remaining_players() {
        let (_, service) = player_service();
        service.create(to_save("Almond", 100)).await.unwrap();
        service.create(to_save("Birch", 300)).await.unwrap();
        service.create(to_save("Cedar", 200)).await.unwrap();

        service
            .delete("Birch")
            .await
            .expect("Failed to delete player");

        let players = service.get_all_players().await.unwrap();
        let summary: Vec<(&str, u32)> = players
            .iter()
            .map(|p| (p.last_name.as_str(), p.rank.position))
            .collect();
        assert_eq!(summary, vec![("Cedar", 1), ("Almond", 2)]);
    }

    #[tokio::test]
    async fn test_delete_missing_player_fails() {
        let (_, service) = player_service();
        assert!(matches!(
            service.delete("Ghost").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
