//! Optional demo data for fresh installations.

use sqlx::PgPool;

/// Demo projects as `(name, description, module_type)`.
const DEMO_PROJECTS: &[(&str, &str, &str)] = &[
    ("Website Redesign", "Complete redesign of the company website", "proiecte"),
    ("Mobile App", "Mobile application development", "proiecte"),
    ("EVOM Training", "Team training programme", "evom"),
    ("Server Maintenance", "Server maintenance and patching", "operational"),
];

pub const DEMO_USER_EMAIL: &str = "demo@company.com";

/// Insert the demo user and demo projects unless they already exist.
///
/// Returns the number of rows inserted. Safe to run on every startup.
pub async fn seed_demo_data(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    inserted += sqlx::query(
        "INSERT INTO users (name, email, role, department)
         VALUES ('Demo User', $1, 'Admin', 'IT')
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(DEMO_USER_EMAIL)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    for (name, description, module_type) in DEMO_PROJECTS {
        inserted += sqlx::query(
            "INSERT INTO projects (name, description, module_type, visibility_type)
             SELECT $1, $2, $3, 'all'
             WHERE NOT EXISTS (SELECT 1 FROM projects WHERE name = $1)",
        )
        .bind(name)
        .bind(description)
        .bind(module_type)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    tracing::info!(inserted, "Demo data seeded");
    Ok(inserted)
}
