use cms_api_rs::prelude::*;
use cms_api_rs::HttpErrorKind;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let origin = std::env::args().nth(1).unwrap_or_else(|| "http://localhost:3000".to_string());
    let client = ApiClient::new(ClientConfig::browser(&origin)?)?.with_notifier(|notification: Notification| {
        eprintln!("[toast] {}", notification.message);
    });

    let categories = client.categories();
    let result = categories
        .update_category_info_with(
            "42",
            "New Title",
            "Guides",
            CategoryStatus::InProgress,
            // The generic toast stays quiet for conflicts; they are resolved below
            RequestOptions::new().skip_error_codes([409]),
        )
        .await;

    match result {
        Ok(value) => println!("Updated: {}", value),
        Err(e) => match e.http_kind() {
            Some(HttpErrorKind::Conflict) => {
                println!("Edit conflict, server state: {}", e.response_body().cloned().unwrap_or_default());
                let latest = categories.get_category_by_id("42").await?;
                println!("Latest title is {:?}; merge and retry manually", latest.title);
            }
            _ => println!("Update failed: {}", e),
        },
    }

    Ok(())
}
