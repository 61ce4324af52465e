mod collision;
mod components;
mod mob;
mod systems;

pub use collision::{Slide, try_move, try_move_with_slide};
pub use components::{Active, Behavior, GameStatus, Intents, Position, Scale, Sprite};
pub use mob::spawn_actor;
pub use systems::{Event, Events, actor_think, player_input};
