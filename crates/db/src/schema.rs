use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date_type VARCHAR(10) NOT NULL DEFAULT 'specific',
            specific_date DATE NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            max_bookings INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT positive_capacity CHECK (max_bookings > 0),
            CONSTRAINT specific_needs_date CHECK (date_type <> 'specific' OR specific_date IS NOT NULL)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            time_slot_id UUID NOT NULL REFERENCES time_slots(id) ON DELETE CASCADE,
            client_name VARCHAR(100) NOT NULL,
            client_email VARCHAR(254) NOT NULL,
            client_phone VARCHAR(20) NOT NULL,
            shooting_type VARCHAR(20) NOT NULL DEFAULT 'portrait',
            message TEXT NOT NULL DEFAULT '',
            is_confirmed BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            confirmation_code VARCHAR(20) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create shooting_types table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shooting_types (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(100) NOT NULL UNIQUE,
            slug VARCHAR(100) NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create albums table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title VARCHAR(200) NOT NULL,
            slug VARCHAR(200) NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            cover VARCHAR(255) NULL,
            is_published BOOLEAN NOT NULL DEFAULT TRUE,
            is_featured BOOLEAN NOT NULL DEFAULT FALSE,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS album_shooting_types (
            album_id UUID NOT NULL REFERENCES albums(id) ON DELETE CASCADE,
            shooting_type_id UUID NOT NULL REFERENCES shooting_types(id) ON DELETE CASCADE,
            PRIMARY KEY (album_id, shooting_type_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create photos table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            album_id UUID NOT NULL REFERENCES albums(id) ON DELETE CASCADE,
            image VARCHAR(255) NOT NULL,
            title VARCHAR(200) NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            is_cover_candidate BOOLEAN NOT NULL DEFAULT FALSE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create videos table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS videos (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title VARCHAR(200) NOT NULL,
            video_file VARCHAR(255) NULL,
            youtube_url VARCHAR(255) NULL,
            thumbnail VARCHAR(255) NULL,
            description TEXT NOT NULL DEFAULT '',
            is_published BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS video_shooting_types (
            video_id UUID NOT NULL REFERENCES videos(id) ON DELETE CASCADE,
            shooting_type_id UUID NOT NULL REFERENCES shooting_types(id) ON DELETE CASCADE,
            PRIMARY KEY (video_id, shooting_type_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(100) NOT NULL,
            price NUMERIC(8, 2) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Singleton row, pinned to id 1
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS site_settings (
            id INTEGER PRIMARY KEY DEFAULT 1 CHECK (id = 1),
            title VARCHAR(200) NOT NULL,
            phone VARCHAR(20) NOT NULL DEFAULT '',
            email VARCHAR(254) NOT NULL DEFAULT '',
            instagram VARCHAR(255) NULL,
            telegram VARCHAR(255) NULL,
            whatsapp VARCHAR(255) NULL,
            vk VARCHAR(255) NULL,
            about_text TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reviews table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            author VARCHAR(100) NOT NULL,
            email VARCHAR(254) NOT NULL,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            text TEXT NOT NULL,
            photo VARCHAR(255) NULL,
            is_public BOOLEAN NOT NULL DEFAULT FALSE,
            status VARCHAR(10) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS social_reviews (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            source VARCHAR(20) NOT NULL,
            external_id VARCHAR(100) NOT NULL UNIQUE,
            author VARCHAR(100) NOT NULL,
            text TEXT NOT NULL,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            photo_url VARCHAR(255) NULL,
            post_url VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL,
            imported_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_time_slots_specific_date ON time_slots(specific_date, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_time_slot_id ON bookings(time_slot_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_photos_album_id ON photos(album_id)",
        "CREATE INDEX IF NOT EXISTS idx_reviews_status ON reviews(status, is_public)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
