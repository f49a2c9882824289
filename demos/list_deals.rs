//! Lists open deals page by page
//!
//! Run with:
//! PIPEDRIVE_API_TOKEN=... cargo run --example list_deals

use pipedrive_sdk::{
    api::DealListOptions, middleware::LoggingMiddleware, types::DealStatus, Pipedrive,
    PipedriveError,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pipedrive = Pipedrive::from_env()?
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    let mut options = DealListOptions {
        status: Some(DealStatus::Open),
        limit: Some(50),
        ..Default::default()
    };

    loop {
        let page = match pipedrive.deals().list(&options).await {
            Ok(page) => page,
            Err(PipedriveError::RateLimitExceeded { rate, .. }) => {
                eprintln!("quota spent, try again after {}", rate.reset);
                break;
            }
            Err(error) => return Err(error.into()),
        };

        for deal in &page.data {
            println!("#{} {} ({} {})", deal.id, deal.title, deal.value, deal.currency);
        }

        match page.additional_data.and_then(|a| a.next_start()) {
            Some(next) => options.start = Some(next),
            None => break,
        }
    }

    println!("Rate: {}", pipedrive.rate());

    Ok(())
}
