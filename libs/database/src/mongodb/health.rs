use mongodb::{Database, bson::doc};

use super::MongoError;

/// Ping the database; used by the readiness endpoint.
pub async fn check_health(db: &Database) -> Result<(), MongoError> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::Client;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = Client::with_uri_str(&url).await.unwrap();
        assert!(check_health(&client.database("test")).await.is_ok());
    }
}
