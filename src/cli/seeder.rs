//! Fake asset data for local development.
//!
//! Seeded rows carry a `SEED-` serial number prefix so they can be cleared
//! without touching real inventory.

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use inventra_models::{AssetStatus, NewAsset};

pub const SEED_SERIAL_PREFIX: &str = "SEED-";

const BATCH_SIZE: usize = 500;

const DEPARTMENTS: [&str; 8] = [
    "Finance",
    "Engineering",
    "Human Resources",
    "Procurement",
    "Operations",
    "Legal",
    "Medical",
    "Registry",
];

const DESIGNATIONS: [&str; 6] = [
    "Officer",
    "Senior Officer",
    "Manager",
    "Technician",
    "Analyst",
    "Director",
];

const MAKES: [(&str, &[&str]); 4] = [
    ("APC", &["Back-UPS 650", "Smart-UPS 1500", "Easy UPS 3000"]),
    ("Eaton", &["5E 850", "9SX 2000"]),
    ("Mercury", &["Elite 1500 Pro", "Elite 650"]),
    ("Vertiv", &["Liebert GXT5", "Liebert PSI5"]),
];

const CAPACITIES: [&str; 5] = ["650", "850", "1500", "2000", "3000"];

const BLOCKS: [&str; 4] = ["A", "B", "C", "D"];

const LOCATIONS: [&str; 3] = ["Headquarters", "Annex", "Field Office"];

/// Generates `count` assets with staff IDs starting after `staff_id_offset`.
pub fn generate_assets(count: usize, staff_id_offset: i64) -> Vec<NewAsset> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_asset(idx, staff_id_offset))
        .collect()
}

fn generate_asset(idx: usize, staff_id_offset: i64) -> NewAsset {
    let (make, models) = MAKES[idx % MAKES.len()];
    let model = models[(0..models.len()).fake::<usize>()];
    let days_ago = (0..1825).fake::<i64>();
    let status = if (0..10).fake::<u8>() == 0 {
        AssetStatus::NonFunctional
    } else {
        AssetStatus::Functional
    };

    NewAsset {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        staff_id: staff_id_offset + idx as i64 + 1,
        designation: pick(&DESIGNATIONS).to_string(),
        department: pick(&DEPARTMENTS).to_string(),
        location: pick(&LOCATIONS).to_string(),
        block: pick(&BLOCKS).to_string(),
        room_number: (1..400).fake::<u16>().to_string(),
        make: make.to_string(),
        model: model.to_string(),
        serial_number: format!(
            "{}{}",
            SEED_SERIAL_PREFIX,
            Uuid::new_v4().simple().to_string().to_uppercase()
        ),
        capacity_va: pick(&CAPACITIES).to_string(),
        issue_date: Utc::now() - Duration::days(days_ago),
        status,
    }
}

fn pick<'a>(values: &[&'a str]) -> &'a str {
    values[(0..values.len()).fake::<usize>()]
}

/// Seeds `count` assets. Staff IDs continue from the current maximum.
pub async fn seed_assets(db: &PgPool, count: usize) -> Result<u64, sqlx::Error> {
    let start_time = Instant::now();
    println!("📦 Seeding {} assets...", count);

    let max_staff_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(staff_id), 0) FROM assets")
        .fetch_one(db)
        .await?;

    let assets = generate_assets(count, max_staff_id);
    println!("   ✓ Generated data in {:?}", start_time.elapsed());

    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for chunk in assets.chunks(BATCH_SIZE) {
        inserted += insert_assets_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} assets in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_assets_chunk(
    tx: &mut Transaction<'_, Postgres>,
    assets: &[NewAsset],
) -> Result<u64, sqlx::Error> {
    if assets.is_empty() {
        return Ok(0);
    }

    const COLUMNS: usize = 14;
    let mut query = String::from(
        "INSERT INTO assets (first_name, last_name, staff_id, designation, department, \
         location, block, room_number, make, model, serial_number, capacity_va, issue_date, \
         status) VALUES ",
    );

    for i in 0..assets.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let placeholders: Vec<String> = (1..=COLUMNS)
            .map(|col| format!("${}", i * COLUMNS + col))
            .collect();
        query.push('(');
        query.push_str(&placeholders.join(", "));
        query.push(')');
    }

    let mut q = sqlx::query(&query);
    for asset in assets {
        q = q
            .bind(&asset.first_name)
            .bind(&asset.last_name)
            .bind(asset.staff_id)
            .bind(&asset.designation)
            .bind(&asset.department)
            .bind(&asset.location)
            .bind(&asset.block)
            .bind(&asset.room_number)
            .bind(&asset.make)
            .bind(&asset.model)
            .bind(&asset.serial_number)
            .bind(&asset.capacity_va)
            .bind(asset.issue_date)
            .bind(asset.status);
    }

    let result = q.execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

/// Deletes every asset whose serial number carries the seed prefix.
pub async fn clear_seeded_assets(db: &PgPool) -> Result<u64, sqlx::Error> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded assets...");

    let result = sqlx::query("DELETE FROM assets WHERE serial_number LIKE $1")
        .bind(format!("{}%", SEED_SERIAL_PREFIX))
        .execute(db)
        .await?;

    println!(
        "   ✓ Deleted {} assets in {:?}",
        result.rows_affected(),
        start_time.elapsed()
    );

    Ok(result.rows_affected())
}
