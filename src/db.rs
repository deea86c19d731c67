use crate::error::DbError;
use crate::models::contact::{ContactForm, ContactMessage};
use crate::models::restaurant::{NewRestaurant, Restaurant, RestaurantId};
use crate::models::review::{NewReview, Review};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

// Collections of JSON documents, one table each
const RESTAURANTS: &str = "restaurants";
const REVIEWS: &str = "reviews";
const CONTACT_MESSAGES: &str = "contact_messages";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // Helper function to create test database
    async fn create_test_db() -> Database {
        let db = Database::open(":memory:").unwrap();
        db.create_schema().await.unwrap();
        db
    }

    fn restaurant(title: &str) -> NewRestaurant {
        NewRestaurant {
            title: title.into(),
            description: format!("{} description", title),
            image_url: format!("https://img.example.com/{}.jpg", title),
            rating: 4.2,
        }
    }

    fn review_for(restaurant_id: RestaurantId, title: &str) -> NewReview {
        NewReview {
            restaurant_id,
            title: title.into(),
            content: "Crispy and warm".into(),
            rating: 5,
            author_name: "Sam".into(),
            date_posted: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_schema_creation() {
        let db = create_test_db().await;

        let guard = db.conn.lock().await;
        let conn = guard.as_ref().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"restaurants".to_string()));
        assert!(tables.contains(&"reviews".to_string()));
        assert!(tables.contains(&"contact_messages".to_string()));
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let db = create_test_db().await;
        db.create_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_full_restaurant_lifecycle() {
        let db = create_test_db().await;

        let created = db.create_restaurant(restaurant("Blue Door")).await.unwrap();
        let fetched = db.get_restaurant(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);

        let all = db.list_restaurants().await.unwrap();
        assert_eq!(all, vec![created.clone()]);

        assert!(db.delete_restaurant(&created.id.to_string()).await.unwrap());
        assert!(db
            .get_restaurant(&created.id.to_string())
            .await
            .unwrap_err()
            .is_not_found());

        // Second delete matches nothing
        assert!(!db.delete_restaurant(&created.id.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_keeps_insertion_order() {
        let db = create_test_db().await;
        for title in ["a", "b", "c", "d"] {
            db.create_restaurant(restaurant(title)).await.unwrap();
        }
        let titles: Vec<String> = db
            .list_restaurants()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let db = create_test_db().await;
        let absent = RestaurantId::generate().to_string();

        assert!(db.get_restaurant(&absent).await.unwrap_err().is_not_found());
        assert!(db.get_restaurant("not-an-id").await.unwrap_err().is_not_found());
        assert!(db.delete_restaurant("not-an-id").await.unwrap_err().is_not_found());
        assert!(!db.delete_restaurant(&absent).await.unwrap());
    }

    #[tokio::test]
    async fn test_reviews_are_filtered_by_restaurant() {
        let db = create_test_db().await;
        let first = db.create_restaurant(restaurant("first")).await.unwrap();
        let second = db.create_restaurant(restaurant("second")).await.unwrap();

        let kept = db.create_review(review_for(first.id, "one")).await.unwrap();
        db.create_review(review_for(second.id, "other")).await.unwrap();
        let kept_too = db.create_review(review_for(first.id, "two")).await.unwrap();

        let reviews = db.list_reviews_for_restaurant(first.id).await.unwrap();
        assert_eq!(reviews, vec![kept, kept_too]);

        let none = db
            .list_reviews_for_restaurant(RestaurantId::generate())
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_orphaned_reviews_survive_restaurant_deletion() {
        let db = create_test_db().await;
        let gone = db.create_restaurant(restaurant("gone")).await.unwrap();
        db.create_review(review_for(gone.id, "left behind")).await.unwrap();

        db.delete_restaurant(&gone.id.to_string()).await.unwrap();
        assert_eq!(db.list_reviews_for_restaurant(gone.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_messages() {
        let db = create_test_db().await;
        let stored = db
            .create_contact_message(ContactForm {
                name: "A".into(),
                email: "a@b.com".into(),
                phone: "555".into(),
                message: "hi".into(),
            })
            .await
            .unwrap();

        assert_eq!(db.list_contact_messages().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let db = create_test_db().await;
        db.close().await.unwrap();

        assert!(matches!(db.list_restaurants().await, Err(DbError::Closed)));
        assert!(matches!(
            db.create_restaurant(restaurant("late")).await,
            Err(DbError::Closed)
        ));
        // Closing twice is harmless
        db.close().await.unwrap();
    }
}

/// Handle on the document store.
///
/// Constructed once at startup and shared with every handler; the connection
/// is released by [`Database::close`] on shutdown.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Option<Connection>>,
}

impl Database {
    // Open the store at `db_path` (":memory:" for a throwaway store)
    pub fn open(db_path: &str) -> Result<Self, DbError> {
        let conn = Connection::open(db_path)?;
        info!(path = db_path, "Database connection established");
        Ok(Database {
            conn: Mutex::new(Some(conn)),
        })
    }

    // Create the collections if they do not exist yet
    pub async fn create_schema(&self) -> Result<(), DbError> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;

        for collection in [RESTAURANTS, REVIEWS, CONTACT_MESSAGES] {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {collection} (
                    seq INTEGER PRIMARY KEY AUTOINCREMENT,
                    id TEXT NOT NULL UNIQUE,
                    doc TEXT NOT NULL
                );"
            ))
            .map_err(|e| {
                error!(collection, error = %e, "Failed creating collection");
                e
            })?;
        }

        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS reviews_by_restaurant
                ON reviews (json_extract(doc, '$.restaurant_id'));",
        )?;
        Ok(())
    }

    pub async fn close(&self) -> Result<(), DbError> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| DbError::from(e))?;
            info!("Database connection closed");
        }
        Ok(())
    }

    async fn find_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, DbError> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;

        let mut stmt = conn.prepare(&format!("SELECT doc FROM {collection} ORDER BY seq"))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut docs = Vec::new();
        for row in rows {
            docs.push(serde_json::from_str(&row?)?);
        }
        debug!(collection, count = docs.len(), "find all");
        Ok(docs)
    }

    // Equality filter on one top-level document field
    async fn find_by<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<T>, DbError> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT doc FROM {collection} WHERE json_extract(doc, ?1) = ?2 ORDER BY seq"
        ))?;
        let rows = stmt.query_map(params![format!("$.{field}"), value], |row| {
            row.get::<_, String>(0)
        })?;
        let mut docs = Vec::new();
        for row in rows {
            docs.push(serde_json::from_str(&row?)?);
        }
        debug!(collection, field, value, count = docs.len(), "find by filter");
        Ok(docs)
    }

    async fn find_by_id<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, DbError> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;

        let doc: Option<String> = conn
            .query_row(
                &format!("SELECT doc FROM {collection} WHERE id = ?1"),
                [id],
                |row| row.get(0),
            )
            .optional()?;
        debug!(collection, id, found = doc.is_some(), "find by id");
        Ok(doc.map(|doc| serde_json::from_str(&doc)).transpose()?)
    }

    async fn insert<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<(), DbError> {
        let doc = serde_json::to_string(doc)?;
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;

        conn.execute(
            &format!("INSERT INTO {collection} (id, doc) VALUES (?1, ?2)"),
            params![id, doc],
        )?;
        debug!(collection, id, "inserted document");
        Ok(())
    }

    // Returns the number of documents removed
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<usize, DbError> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;

        let removed = conn.execute(&format!("DELETE FROM {collection} WHERE id = ?1"), [id])?;
        debug!(collection, id, removed, "delete by id");
        Ok(removed)
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, DbError> {
        self.find_all(RESTAURANTS).await
    }

    // Malformed identifiers are reported as NotFound without touching the store
    pub async fn get_restaurant(&self, id: &str) -> Result<Restaurant, DbError> {
        let id = RestaurantId::parse(id).ok_or(DbError::NotFound)?;
        self.find_by_id(RESTAURANTS, &id.to_string())
            .await?
            .ok_or(DbError::NotFound)
    }

    pub async fn create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, DbError> {
        let restaurant = restaurant.into_restaurant(RestaurantId::generate());
        self.insert(RESTAURANTS, &restaurant.id.to_string(), &restaurant)
            .await?;
        info!(id = %restaurant.id, title = %restaurant.title, "Restaurant created");
        Ok(restaurant)
    }

    /// Deletes at most one restaurant and reports whether anything was removed.
    ///
    /// A malformed identifier is `NotFound`; a well-formed identifier that
    /// matches nothing is `Ok(false)`. Reviews pointing at the restaurant are
    /// left in place.
    pub async fn delete_restaurant(&self, id: &str) -> Result<bool, DbError> {
        let id = RestaurantId::parse(id).ok_or(DbError::NotFound)?;
        let removed = self.delete_by_id(RESTAURANTS, &id.to_string()).await?;
        info!(%id, removed, "Restaurant delete");
        Ok(removed > 0)
    }

    pub async fn list_reviews_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Review>, DbError> {
        self.find_by(REVIEWS, "restaurant_id", &restaurant_id.to_string())
            .await
    }

    pub async fn create_review(&self, review: NewReview) -> Result<Review, DbError> {
        let review = review.into_review(Uuid::new_v4());
        self.insert(REVIEWS, &review.id.to_string(), &review).await?;
        info!(id = %review.id, restaurant_id = %review.restaurant_id, "Review created");
        Ok(review)
    }

    pub async fn create_contact_message(
        &self,
        form: ContactForm,
    ) -> Result<ContactMessage, DbError> {
        let message = form.into_message(Uuid::new_v4());
        self.insert(CONTACT_MESSAGES, &message.id.to_string(), &message)
            .await?;
        info!(id = %message.id, "Contact message stored");
        Ok(message)
    }

    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, DbError> {
        self.find_all(CONTACT_MESSAGES).await
    }
}
