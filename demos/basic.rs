use cms_api_rs::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads PORT, CMS_EXECUTION_CONTEXT, CMS_ORIGIN and CMS_TIMEOUT_SECS
    let client = from_env()?.with_notifier(|notification: Notification| {
        eprintln!("[toast] {} ({:?})", notification.message, notification.details.response_code);
    });

    let categories = client.categories();

    let id = categories
        .create_category(NewCategory::new("Getting started", "Guides"))
        .await?;
    println!("Created category {}", id);

    let category = categories.get_category_by_id(&id).await?;
    println!("{} [{}] with {} items", category.title, category.status, category.items.len());

    for info in categories.get_category_list().await? {
        println!("- {} / {} ({})", info.group, info.title, info.status);
    }

    Ok(())
}
