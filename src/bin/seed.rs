use chrono::{Duration, Utc};
use clap::Parser;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use milonga::{
    domain::{
        ClassLevel, CreateMemberRequest, CreateProductRequest, CreateSchoolRequest, DanceClass,
        DanceStyle, Event, ProductCategory, ProductCondition, Weekday,
    },
    repository::{
        EventRepository, MemberRepository, ProductRepository, SchoolRepository,
        SqliteEventRepository, SqliteMemberRepository, SqliteProductRepository,
        SqliteSchoolRepository,
    },
};

#[derive(Parser)]
#[command(about = "Seed the milonga database with sample data")]
struct Args {
    /// Database URL; falls back to DATABASE_URL, then sqlite:milonga.db
    #[arg(long)]
    database_url: Option<String>,

    /// Extra generated events on top of the curated set
    #[arg(long, default_value_t = 20)]
    events: usize,

    /// Generated members in addition to the curated ones
    #[arg(long, default_value_t = 10)]
    members: usize,
}

const STYLES: [DanceStyle; 5] = [
    DanceStyle::Salsa,
    DanceStyle::Bachata,
    DanceStyle::Kizomba,
    DanceStyle::Tango,
    DanceStyle::Swing,
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:milonga.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let event_repo = SqliteEventRepository::new(db_pool.clone());
    let school_repo = SqliteSchoolRepository::new(db_pool.clone());
    let product_repo = SqliteProductRepository::new(db_pool.clone());
    let member_repo = SqliteMemberRepository::new(db_pool.clone());

    let mut rng = rand::thread_rng();

    // Members
    println!("👥 Creating members...");

    let organizer = member_repo
        .create(CreateMemberRequest {
            email: "organizer@milonga.local".to_string(),
            username: "organizer".to_string(),
            full_name: "Event Organizer".to_string(),
            dance_styles: vec![DanceStyle::Salsa, DanceStyle::Bachata],
        })
        .await?;

    for i in 0..args.members {
        let full_name: String = Name().fake();
        member_repo
            .create(CreateMemberRequest {
                email: format!("dancer{}@example.com", i + 1),
                username: format!("dancer{}", i + 1),
                full_name,
                dance_styles: vec![STYLES[rng.gen_range(0..STYLES.len())]],
            })
            .await?;
    }

    println!("  ✅ Created {} members", args.members + 1);

    // Curated events around the Istanbul city center, so discovery with an
    // observer near (41.0, 29.0) returns a meaningful ordering.
    println!("📅 Creating events...");

    let now = Utc::now();
    let curated = [
        ("Salsa Sensations Night", "Club Havana", DanceStyle::Salsa, Some(now), Some((41.008, 28.978)), Some("₺150")),
        ("Bachata Bliss Party", "The Dance Floor", DanceStyle::Bachata, Some(now + Duration::days(1)), Some((41.042, 29.008)), Some("₺200")),
        ("Urban Kizomba Workshop", "Studio 34", DanceStyle::Kizomba, Some(now + Duration::days(5)), Some((41.018, 28.985)), Some("₺250")),
        ("Tango Milonga Night", "Pera Palace", DanceStyle::Tango, Some(now + Duration::days(25)), Some((41.032, 28.975)), Some("₺180")),
    ];

    for (title, location, style, starts_at, coords, price) in curated {
        let description: String = Sentence(8..16).fake();
        event_repo
            .create(Event {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description,
                dance_style: style,
                starts_at,
                location: location.to_string(),
                latitude: coords.map(|c| c.0),
                longitude: coords.map(|c| c.1),
                price: price.map(|p| p.to_string()),
                image_url: None,
                created_by: organizer.id,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    for i in 0..args.events {
        let style = STYLES[rng.gen_range(0..STYLES.len())];
        let description: String = Sentence(8..16).fake();
        // Roughly one in five generated events has no venue pin yet.
        let coords = if rng.gen_range(0..5) == 0 {
            None
        } else {
            Some((
                41.0 + rng.gen_range(-0.08..0.08),
                29.0 + rng.gen_range(-0.08..0.08),
            ))
        };

        event_repo
            .create(Event {
                id: Uuid::new_v4(),
                title: format!("{} Social #{}", style.as_str(), i + 1),
                description,
                dance_style: style,
                starts_at: Some(now + Duration::days(rng.gen_range(0..30))),
                location: format!("Studio {}", rng.gen_range(1..40)),
                latitude: coords.map(|c| c.0),
                longitude: coords.map(|c| c.1),
                price: Some(format!("₺{}", rng.gen_range(5..40) * 10)),
                image_url: None,
                created_by: organizer.id,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    println!("  ✅ Created {} events", curated.len() + args.events);

    // Schools
    println!("🏫 Creating schools...");

    let salsa_academy = school_repo
        .create(CreateSchoolRequest {
            name: "Salsa Academy Istanbul".to_string(),
            location: "Kadıköy, İstanbul".to_string(),
            latitude: Some(40.990),
            longitude: Some(29.027),
            is_open: true,
            tags: vec![DanceStyle::Salsa, DanceStyle::Bachata],
            phone: Some("02161234567".to_string()),
            image_url: None,
        })
        .await?;

    school_repo
        .create(CreateSchoolRequest {
            name: "Tango Studio".to_string(),
            location: "Beşiktaş, İstanbul".to_string(),
            latitude: Some(41.043),
            longitude: Some(29.005),
            is_open: false,
            tags: vec![DanceStyle::Tango],
            phone: None,
            image_url: None,
        })
        .await?;

    school_repo
        .create(CreateSchoolRequest {
            name: "Latin Dance House".to_string(),
            location: "Şişli, İstanbul".to_string(),
            latitude: Some(41.060),
            longitude: Some(28.987),
            is_open: true,
            tags: vec![DanceStyle::Salsa, DanceStyle::Bachata, DanceStyle::Kizomba],
            phone: None,
            image_url: None,
        })
        .await?;

    school_repo
        .add_class(DanceClass {
            id: Uuid::new_v4(),
            school_id: salsa_academy.id,
            title: "Salsa Fundamentals".to_string(),
            instructor: "Can Vural".to_string(),
            weekday: Weekday::Tuesday,
            time: "19:00".to_string(),
            level: ClassLevel::Beginner,
        })
        .await?;

    school_repo
        .add_class(DanceClass {
            id: Uuid::new_v4(),
            school_id: salsa_academy.id,
            title: "Bachata Partnerwork".to_string(),
            instructor: "Selin Kara".to_string(),
            weekday: Weekday::Thursday,
            time: "20:30".to_string(),
            level: ClassLevel::Intermediate,
        })
        .await?;

    println!("  ✅ Created 3 schools with classes");

    // Marketplace
    println!("🛍️  Creating products...");

    product_repo
        .create(CreateProductRequest {
            title: "Latin dance heels, size 38".to_string(),
            price_cents: 120_000,
            category: ProductCategory::Shoes,
            condition: ProductCondition::LikeNew,
            description: Some("Worn twice, suede sole.".to_string()),
            image_url: None,
            seller_id: organizer.id,
        })
        .await?;

    product_repo
        .create(CreateProductRequest {
            title: "Practice skirt".to_string(),
            price_cents: 45_000,
            category: ProductCategory::Clothing,
            condition: ProductCondition::New,
            description: None,
            image_url: None,
            seller_id: organizer.id,
        })
        .await?;

    println!("  ✅ Created products");
    println!("🎉 Seeding complete!");

    Ok(())
}
