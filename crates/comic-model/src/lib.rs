//! Record types shared by the comic store and the viewer.

pub mod comic;
pub mod error;
pub mod favorite;
pub mod identity;
pub mod ids;

pub use comic::{Comic, ComicBuilder, ComicRecord};
pub use error::{ModelError, Result};
pub use favorite::FavoriteRow;
pub use identity::{Identity, Role};
pub use ids::{ComicId, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_row_matches_pair() {
        let user = UserId::new("u-1").unwrap();
        let comic = ComicId::new("c-1").unwrap();
        let row = FavoriteRow::new(user.clone(), comic.clone());
        assert!(row.matches(&user, &comic));
        assert!(!row.matches(&UserId::new("u-2").unwrap(), &comic));
    }

    #[test]
    fn comic_round_trips_through_json() {
        let comic = Comic::builder(
            ComicId::new("c-1").unwrap(),
            "Wet Floor",
            UserId::new("u-1").unwrap(),
        )
        .frame_count(3)
        .tags(["janitor"])
        .build()
        .expect("valid comic");
        let json = serde_json::to_string(&comic).expect("serialize comic");
        let back: Comic = serde_json::from_str(&json).expect("deserialize comic");
        assert_eq!(back, comic);
    }
}
