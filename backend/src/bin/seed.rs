//! Seed the camp database with sample activities, campers and signups
//!
//! Wipes every table first. Reads `DB_URI` like the server does.

use camp_signup_backend::camp::{CampDb, NewActivity, NewCamper, NewSignup};
use camp_signup_backend::config::Config;
use tracing::info;

const ACTIVITIES: &[(&str, i64)] = &[
    ("Archery", 2),
    ("Canoeing", 3),
    ("Rock Climbing", 5),
    ("Arts and Crafts", 1),
    ("Swimming", 2),
    ("Orienteering", 4),
];

const CAMPERS: &[(&str, i64)] = &[
    ("Caitlin", 8),
    ("Lizzie", 9),
    ("Nicholas", 12),
    ("Ashley", 11),
    ("Zoe", 16),
    ("Jordan", 18),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let db = CampDb::new(&config.database).await?;

    println!("Clearing existing data...");
    db.clear_all().await?;

    let mut activities = Vec::with_capacity(ACTIVITIES.len());
    for (name, difficulty) in ACTIVITIES {
        let activity = db
            .create_activity(&NewActivity {
                name: name.to_string(),
                difficulty: *difficulty,
            })
            .await?;
        activities.push(activity);
    }

    let mut campers = Vec::with_capacity(CAMPERS.len());
    for (name, age) in CAMPERS {
        campers.push(db.create_camper(&NewCamper::new(name.to_string(), *age)?).await?);
    }

    // Two signups per camper, spread over the day
    let mut signups = 0;
    for (i, camper) in campers.iter().enumerate() {
        for offset in 0..2 {
            let activity = &activities[(i + offset * 3) % activities.len()];
            let time = ((9 + i * 2 + offset * 5) % 24) as i64;
            let new_signup = NewSignup::new(camper.id, activity.id, time)?;
            if db.create_signup(&new_signup).await?.is_some() {
                signups += 1;
            }
        }
    }

    info!(
        activities = activities.len(),
        campers = campers.len(),
        signups,
        "Seeding complete"
    );
    println!(
        "✓ Seeded {} activities, {} campers and {} signups into {}",
        activities.len(),
        campers.len(),
        signups,
        config.database.url
    );
    Ok(())
}
