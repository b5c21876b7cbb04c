//! Phone sign-in and stress assessment walkthrough
//!
//! Run with: cargo run -p zm_infra --example phone_login_demo
//!
//! Set `REDIS_URL` and `USE_REDIS=1` to keep records in Redis instead of
//! process memory.

use std::sync::Arc;

use anyhow::{Context, Result};
use zm_core::{
    KeyValueStoreTrait, LoginOutcome, PhoneLoginService, StressScorer, QUESTIONS,
};
use zm_infra::cache::InMemoryStore;
use zm_infra::logging::init_tracing;
use zm_infra::sms::{create_delivery_service, MockDeliveryService};
use zm_infra::{load_config, AppConfig};
use zm_shared::phone::{combine_phone_number, find_country};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("loading configuration")?;
    init_tracing(&config.logging).context("initialising tracing")?;

    println!("=== ZenithMind Demo ===\n");

    let delivery = Arc::new(create_delivery_service(&config)?);

    #[cfg(feature = "redis-cache")]
    if std::env::var("USE_REDIS").is_ok_and(|v| v == "1") {
        println!("Connecting to Redis...");
        let store = zm_infra::cache::RedisStore::connect(config.cache.clone())
            .await
            .context("connecting to Redis")?;
        println!("✓ Redis connected\n");
        return run(Arc::new(store), delivery, &config).await;
    }

    run(Arc::new(InMemoryStore::new()), delivery, &config).await
}

async fn run<S: KeyValueStoreTrait>(
    store: Arc<S>,
    delivery: Arc<MockDeliveryService>,
    config: &AppConfig,
) -> Result<()> {
    let service = PhoneLoginService::new(store, delivery.clone(), config.otp.clone());

    let dial_code = find_country("US").map(|c| c.dial_code).unwrap_or("+1");
    let phone = combine_phone_number(dial_code, "415-555-2671");

    println!("1. Requesting a code for {}", phone);
    let issued = service.request_code(&phone).await?;
    println!("   Code expires at {}", issued.expires_at);
    println!("   Resend available in {}s\n", service.resend_available_in(&phone).await?);

    println!("2. Requesting again straight away");
    match service.resend_code(&phone).await {
        Ok(_) => println!("   Unexpectedly sent a second code\n"),
        Err(e) => println!("   Refused: {}\n", e),
    }

    println!("3. Submitting a wrong code");
    let wrong = if issued.code.as_str() == "000000" { "111111" } else { "000000" };
    if let LoginOutcome::Rejected { message, .. } = service.submit_code(&phone, wrong).await? {
        println!("   {}\n", message);
    }

    println!("4. Submitting the delivered code");
    let sms = delivery
        .last_message_to(&phone)
        .await
        .context("no SMS was delivered")?;
    println!("   SMS: {}", sms.body);
    match service.submit_code(&phone, issued.code.as_str()).await? {
        LoginOutcome::SignedIn { user } => println!("   Signed in as {} ({:?})\n", user.name, user.phone_number),
        LoginOutcome::Rejected { message, .. } => println!("   {}\n", message),
    }

    println!("5. Taking the stress assessment");
    let answers = [2, 3, 1, 2, 3, 2, 1, 2, 3, 2];
    for (question, answer) in QUESTIONS.iter().zip(answers.iter()) {
        println!("   {}. {} -> {}", question.id, question.text, question.options[*answer as usize]);
    }
    let report = StressScorer::new().evaluate(&answers)?;
    println!(
        "\n   Result: {} ({:.0}%)\n   {}",
        report.category, report.score.percentage, report.summary
    );
    for recommendation in report.recommendations {
        println!("   - {}", recommendation);
    }

    service.logout().await?;
    println!("\n=== Demo complete ===");
    Ok(())
}
