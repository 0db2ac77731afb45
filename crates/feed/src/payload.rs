//! Wire payloads: line-delimited JSON, one message per line.
//!
//! Shapes follow the game server's grid and players messages, wrapped in a
//! `type` tag so a single connection can carry all of them:
//!
//! ```json
//! {"type":"grid","width":10,"height":10,"bikes":[
//!   {"playerId":7,"currentLocation":[3,4],"direction":"N","trail":[[2,2],[2,3],[3,3]]}
//! ],"spawns":[[0,0]]}
//! {"type":"players","players":[{"id":7,"name":"neo","color":"#28BA3C","frags":2,"owned":11}]}
//! {"type":"ticker","fragger":7,"casulty":3}
//! ```
//!
//! Decoding is the fail-fast boundary of the whole pipeline: a message that
//! does not decode is rejected whole (the previous state stays current), so
//! the renderer never sees half-formed cells. The one lenient spot is the
//! bike direction, where an unknown string becomes "no heading" so the bike
//! still renders its trail.

use serde::{Deserialize, Deserializer};
use tracing::warn;

use tui_cycles_types::{Bike, GridCell, Heading, Player, Rgb, Snapshot, DEFAULT_BIKE_COLOR};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FeedMessage {
    #[serde(rename = "grid")]
    Grid(GridPayload),
    #[serde(rename = "players")]
    Players(PlayersPayload),
    /// Frag ticker; informational only.
    #[serde(rename = "ticker")]
    Ticker(TickerPayload),
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridPayload {
    #[serde(deserialize_with = "nonzero_dim")]
    pub width: u32,
    #[serde(deserialize_with = "nonzero_dim")]
    pub height: u32,
    #[serde(default)]
    pub bikes: Vec<BikePayload>,
    #[serde(default)]
    pub spawns: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikePayload {
    pub player_id: u32,
    pub current_location: [i32; 2],
    pub direction: String,
    #[serde(default)]
    pub trail: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayersPayload {
    pub players: Vec<PlayerPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerPayload {
    pub id: u32,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub frags: u32,
    #[serde(default)]
    pub owned: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerPayload {
    #[serde(default)]
    pub fragger: Option<u32>,
    #[serde(default)]
    pub casulty: Option<u32>,
}

fn cell([col, row]: [i32; 2]) -> GridCell {
    GridCell::new(col, row)
}

/// A zero-sized grid has no layout; the whole message is rejected like any
/// other malformed payload.
fn nonzero_dim<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u32::deserialize(deserializer)?;
    if value == 0 {
        return Err(serde::de::Error::custom("grid dimension must be nonzero"));
    }
    Ok(value)
}

impl GridPayload {
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            cols: self.width,
            rows: self.height,
            bikes: self.bikes.into_iter().map(BikePayload::into_bike).collect(),
            spawns: self.spawns.into_iter().map(cell).collect(),
        }
    }
}

impl BikePayload {
    pub fn into_bike(self) -> Bike {
        let heading = Heading::from_str(&self.direction);
        if heading.is_none() {
            warn!(
                player_id = self.player_id,
                direction = %self.direction,
                "unknown bike direction"
            );
        }
        Bike {
            player_id: self.player_id,
            heading,
            at: cell(self.current_location),
            trail: self.trail.into_iter().map(cell).collect(),
        }
    }
}

impl PlayerPayload {
    pub fn into_player(self) -> Player {
        let color = Rgb::from_hex(&self.color).unwrap_or_else(|| {
            warn!(id = self.id, color = %self.color, "unparsable player color");
            DEFAULT_BIKE_COLOR
        });
        Player {
            id: self.id,
            name: self.name,
            color,
            frags: self.frags,
            owned: self.owned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_message_decodes_into_a_snapshot() {
        let line = r#"{"type":"grid","width":10,"height":12,
            "bikes":[{"playerId":7,"currentLocation":[3,4],"direction":"N",
                      "trail":[[2,2],[2,3],[3,3]]}],
            "spawns":[[0,0],[9,11]]}"#;
        let msg: FeedMessage = serde_json::from_str(line).unwrap();
        let FeedMessage::Grid(grid) = msg else {
            panic!("wrong variant");
        };
        let snap = grid.into_snapshot();

        assert_eq!((snap.cols, snap.rows), (10, 12));
        assert_eq!(snap.spawns, vec![GridCell::new(0, 0), GridCell::new(9, 11)]);
        assert_eq!(snap.bikes.len(), 1);
        let bike = &snap.bikes[0];
        assert_eq!(bike.player_id, 7);
        assert_eq!(bike.heading, Some(Heading::North));
        assert_eq!(bike.at, GridCell::new(3, 4));
        assert_eq!(bike.trail.len(), 3);
    }

    #[test]
    fn unknown_direction_becomes_no_heading() {
        let line = r#"{"type":"grid","width":4,"height":4,
            "bikes":[{"playerId":1,"currentLocation":[1,1],"direction":"up","trail":[[1,0]]}]}"#;
        let msg: FeedMessage = serde_json::from_str(line).unwrap();
        let FeedMessage::Grid(grid) = msg else {
            panic!("wrong variant");
        };
        let snap = grid.into_snapshot();
        assert_eq!(snap.bikes[0].heading, None);
        // The trail survives the unparsable direction.
        assert_eq!(snap.bikes[0].trail, vec![GridCell::new(1, 0)]);
    }

    #[test]
    fn missing_required_fields_reject_the_whole_message() {
        let no_location = r#"{"type":"grid","width":4,"height":4,
            "bikes":[{"playerId":1,"direction":"N"}]}"#;
        assert!(serde_json::from_str::<FeedMessage>(no_location).is_err());

        let no_dims = r#"{"type":"grid","bikes":[]}"#;
        assert!(serde_json::from_str::<FeedMessage>(no_dims).is_err());
    }

    #[test]
    fn zero_grid_dimensions_reject_the_whole_message() {
        let zero_width = r#"{"type":"grid","width":0,"height":4,"bikes":[],"spawns":[]}"#;
        assert!(serde_json::from_str::<FeedMessage>(zero_width).is_err());

        let zero_height = r#"{"type":"grid","width":4,"height":0,"bikes":[],"spawns":[]}"#;
        assert!(serde_json::from_str::<FeedMessage>(zero_height).is_err());
    }

    #[test]
    fn players_message_decodes_with_color() {
        let line = r##"{"type":"players","players":[
            {"id":7,"name":"neo","color":"#28BA3C","frags":2,"owned":11},
            {"id":8,"name":"tron","color":"not-a-color"}]}"##;
        let msg: FeedMessage = serde_json::from_str(line).unwrap();
        let FeedMessage::Players(players) = msg else {
            panic!("wrong variant");
        };
        let roster: Vec<Player> = players.players.into_iter().map(PlayerPayload::into_player).collect();

        assert_eq!(roster[0].color, Rgb::new(0x28, 0xBA, 0x3C));
        assert_eq!(roster[0].frags, 2);
        // Bad color falls back instead of dropping the player.
        assert_eq!(roster[1].color, DEFAULT_BIKE_COLOR);
    }
}
