use std::sync::Arc;

use tripwand::{
    GeminiClient, ItineraryPlanner, ItineraryRequest, MemoryItineraryStore, PersistenceNotifier,
    PlannerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::try_init().ok();

    let config = PlannerConfig::from_env()?;
    let client = GeminiClient::with_timeout(config.api_key.clone(), config.timeout)?
        .with_base_url(config.base_url.clone())
        .with_model(config.model.clone())?;

    let store = Arc::new(MemoryItineraryStore::new());
    let (notifier, worker) =
        PersistenceNotifier::spawn(store.clone(), config.persist_queue_capacity);
    let planner = ItineraryPlanner::from_config(Arc::new(client), &config).with_notifier(notifier);

    let request = ItineraryRequest::new("Busan", 3)
        .with_age_group("30s")
        .with_group_size(2)
        .with_purpose("food and beaches")
        .with_travel_type("relaxed");

    println!("=== Busan Itinerary ===\n");
    println!("Model: {}\n", planner.model());

    let itinerary = planner.generate_itinerary(&request).await?;
    for day in &itinerary.itinerary {
        println!("Day {}", day.day);
        for (slot, block) in day.blocks() {
            println!("  {slot:<9} {}: {}", block.summary, block.detail);
        }
    }
    println!("\nEstimated cost: {} KRW", itinerary.estimated_cost);
    for caution in &itinerary.cautions {
        println!("  ! {caution}");
    }

    drop(planner);
    let report = worker.drain().await;
    let stats = store.stats().await;
    println!(
        "\nStored {} plan(s), {} failed, {} dropped; popular: {:?}",
        report.saved, report.failed, report.dropped, stats.popular_destinations
    );
    Ok(())
}
