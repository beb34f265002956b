pub mod traits;
pub mod trello;

#[cfg(test)]
pub mod testing;

pub use traits::TaskBoard;
pub use trello::TrelloClient;
