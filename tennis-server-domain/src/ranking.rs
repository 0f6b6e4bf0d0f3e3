use crate::player::Player;

/// Re-derives every player's rank position from their points.
///
/// The sort is stable, so players with equal points keep their incoming
/// relative order and end up with distinct consecutive positions.
pub fn compute_ranking(mut players: Vec<Player>) -> Vec<Player> {
    players.sort_by(|a, b| b.rank.points.cmp(&a.rank.points));
    for (index, player) in players.iter_mut().enumerate() {
        player.rank.position = index as u32 + 1;
    }
    players
}
