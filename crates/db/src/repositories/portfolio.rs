use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use framed_core::models::{
    pagination::{Page, PageRequest},
    portfolio::{
        Album, AlbumFilter, CreateAlbumRequest, CreatePhotoRequest, CreateShootingTypeRequest,
        CreateVideoRequest, Photo, ShootingType, UpdateAlbumRequest, Video,
    },
};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{PgStore, PortfolioRepository};
use crate::models::{DbAlbum, DbPhoto, DbShootingType, DbTaggedShootingType, DbVideo};

const SHOOTING_TYPE_COLUMNS: &str = "id, name, slug, description, is_active, sort_order";

const ALBUM_COLUMNS: &str = "a.id, a.title, a.slug, a.description, a.cover, a.is_published, \
     a.is_featured, a.sort_order, a.created_at, a.updated_at";

const PHOTO_COLUMNS: &str =
    "id, album_id, image, title, description, sort_order, created_at, is_cover_candidate";

const VIDEO_COLUMNS: &str =
    "id, title, video_file, youtube_url, thumbnail, description, is_published, created_at";

/// Join tables linking content to shooting types.
#[derive(Debug, Clone, Copy)]
enum Tagged {
    Album,
    Video,
}

impl Tagged {
    fn select(self) -> &'static str {
        match self {
            Tagged::Album => {
                r#"
                SELECT l.album_id AS owner_id, st.id, st.name, st.slug, st.description,
                       st.is_active, st.sort_order
                FROM album_shooting_types l
                JOIN shooting_types st ON st.id = l.shooting_type_id
                WHERE l.album_id = ANY($1)
                ORDER BY st.sort_order, st.name
                "#
            }
            Tagged::Video => {
                r#"
                SELECT l.video_id AS owner_id, st.id, st.name, st.slug, st.description,
                       st.is_active, st.sort_order
                FROM video_shooting_types l
                JOIN shooting_types st ON st.id = l.shooting_type_id
                WHERE l.video_id = ANY($1)
                ORDER BY st.sort_order, st.name
                "#
            }
        }
    }

    fn link(self) -> &'static str {
        match self {
            Tagged::Album => {
                r#"
                INSERT INTO album_shooting_types (album_id, shooting_type_id)
                SELECT $1, id FROM shooting_types WHERE id = ANY($2)
                ON CONFLICT DO NOTHING
                "#
            }
            Tagged::Video => {
                r#"
                INSERT INTO video_shooting_types (video_id, shooting_type_id)
                SELECT $1, id FROM shooting_types WHERE id = ANY($2)
                ON CONFLICT DO NOTHING
                "#
            }
        }
    }
}

/// Escapes `%`, `_` and `\` for use inside an ILIKE pattern.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_album_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AlbumFilter) {
    builder.push(" WHERE a.is_published");

    if let Some(slug) = filter.shooting_type.as_deref().filter(|s| !s.is_empty()) {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM album_shooting_types l \
                 JOIN shooting_types st ON st.id = l.shooting_type_id \
                 WHERE l.album_id = a.id AND st.is_active AND st.slug = ",
            )
            .push_bind(slug.to_string())
            .push(")");
    }
    if let Some(title) = filter.title.as_deref().filter(|t| !t.is_empty()) {
        builder
            .push(" AND a.title ILIKE ")
            .push_bind(like_pattern(title));
    }
    if let Some(featured) = filter.is_featured {
        builder.push(" AND a.is_featured = ").push_bind(featured);
    }
}

fn album_from_row(row: DbAlbum, shooting_types: Vec<ShootingType>) -> Album {
    Album {
        id: row.id,
        title: row.title,
        slug: row.slug,
        description: row.description,
        cover: row.cover,
        shooting_types,
        is_published: row.is_published,
        is_featured: row.is_featured,
        sort_order: row.sort_order,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn video_from_row(row: DbVideo, shooting_types: Vec<ShootingType>) -> Video {
    Video {
        id: row.id,
        title: row.title,
        video_file: row.video_file,
        youtube_url: row.youtube_url,
        thumbnail: row.thumbnail,
        description: row.description,
        shooting_types,
        is_published: row.is_published,
        created_at: row.created_at,
    }
}

impl PgStore {
    async fn shooting_types_for(
        &self,
        tagged: Tagged,
        owner_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ShootingType>>> {
        let rows = sqlx::query_as::<_, DbTaggedShootingType>(tagged.select())
            .bind(owner_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<ShootingType>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.owner_id)
                .or_default()
                .push(row.shooting_type.into());
        }
        Ok(grouped)
    }

    async fn hydrate_albums(&self, rows: Vec<DbAlbum>) -> Result<Vec<Album>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut types = self.shooting_types_for(Tagged::Album, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let shooting_types = types.remove(&row.id).unwrap_or_default();
                album_from_row(row, shooting_types)
            })
            .collect())
    }

    async fn hydrate_videos(&self, rows: Vec<DbVideo>) -> Result<Vec<Video>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut types = self.shooting_types_for(Tagged::Video, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let shooting_types = types.remove(&row.id).unwrap_or_default();
                video_from_row(row, shooting_types)
            })
            .collect())
    }

    async fn hydrate_album(&self, row: Option<DbAlbum>) -> Result<Option<Album>> {
        match row {
            Some(row) => Ok(self.hydrate_albums(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PortfolioRepository for PgStore {
    async fn create_shooting_type(
        &self,
        shooting_type: &CreateShootingTypeRequest,
    ) -> Result<ShootingType> {
        let row = sqlx::query_as::<_, DbShootingType>(&format!(
            r#"
            INSERT INTO shooting_types (id, name, slug, description, is_active, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SHOOTING_TYPE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&shooting_type.name)
        .bind(&shooting_type.slug)
        .bind(&shooting_type.description)
        .bind(shooting_type.is_active)
        .bind(shooting_type.sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_shooting_types(&self, active_only: bool) -> Result<Vec<ShootingType>> {
        let rows = sqlx::query_as::<_, DbShootingType>(&format!(
            r#"
            SELECT {} FROM shooting_types
            WHERE (NOT $1 OR is_active)
            ORDER BY sort_order, name
            "#,
            SHOOTING_TYPE_COLUMNS
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShootingType::from).collect())
    }

    async fn get_shooting_type_by_slug(&self, slug: &str) -> Result<Option<ShootingType>> {
        let row = sqlx::query_as::<_, DbShootingType>(&format!(
            "SELECT {} FROM shooting_types WHERE slug = $1",
            SHOOTING_TYPE_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ShootingType::from))
    }

    async fn delete_shooting_type(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shooting_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_album(&self, album: &CreateAlbumRequest) -> Result<Album> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO albums (id, title, slug, description, cover, is_published, is_featured,
                                sort_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(id)
        .bind(&album.title)
        .bind(&album.slug)
        .bind(&album.description)
        .bind(&album.cover)
        .bind(album.is_published)
        .bind(album.is_featured)
        .bind(album.sort_order)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(Tagged::Album.link())
            .bind(id)
            .bind(&album.shooting_type_ids[..])
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_album(id)
            .await?
            .ok_or_else(|| eyre::eyre!("Album {} vanished after insert", id))
    }

    async fn update_album(&self, id: Uuid, update: &UpdateAlbumRequest) -> Result<Option<Album>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE albums
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                cover = COALESCE($4, cover),
                is_published = COALESCE($5, is_published),
                is_featured = COALESCE($6, is_featured),
                sort_order = COALESCE($7, sort_order),
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.cover)
        .bind(update.is_published)
        .bind(update.is_featured)
        .bind(update.sort_order)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(shooting_type_ids) = &update.shooting_type_ids {
            sqlx::query("DELETE FROM album_shooting_types WHERE album_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            sqlx::query(Tagged::Album.link())
                .bind(id)
                .bind(&shooting_type_ids[..])
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        self.get_album(id).await
    }

    async fn delete_album(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_album(&self, id: Uuid) -> Result<Option<Album>> {
        let row = sqlx::query_as::<_, DbAlbum>(&format!(
            "SELECT {} FROM albums a WHERE a.id = $1",
            ALBUM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_album(row).await
    }

    async fn list_published_albums(
        &self,
        filter: &AlbumFilter,
        page: PageRequest,
    ) -> Result<Page<Album>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM albums a");
        push_album_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM albums a", ALBUM_COLUMNS));
        push_album_filter(&mut select, filter);
        select
            .push(" ORDER BY a.sort_order ASC, a.created_at DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);
        let rows = select
            .build_query_as::<DbAlbum>()
            .fetch_all(&self.pool)
            .await?;

        let albums = self.hydrate_albums(rows).await?;
        Ok(Page::new(albums, page, total as u64))
    }

    async fn get_published_album(&self, slug: &str) -> Result<Option<Album>> {
        let row = sqlx::query_as::<_, DbAlbum>(&format!(
            "SELECT {} FROM albums a WHERE a.slug = $1 AND a.is_published",
            ALBUM_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_album(row).await
    }

    async fn list_album_photos(&self, album_id: Uuid) -> Result<Vec<Photo>> {
        let rows = sqlx::query_as::<_, DbPhoto>(&format!(
            "SELECT {} FROM photos WHERE album_id = $1 ORDER BY sort_order, created_at",
            PHOTO_COLUMNS
        ))
        .bind(album_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Photo::from).collect())
    }

    async fn get_photo(&self, id: Uuid) -> Result<Option<Photo>> {
        let row = sqlx::query_as::<_, DbPhoto>(&format!(
            "SELECT {} FROM photos WHERE id = $1",
            PHOTO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Photo::from))
    }

    async fn create_photo(&self, photo: &CreatePhotoRequest) -> Result<Option<Photo>> {
        let row = sqlx::query_as::<_, DbPhoto>(&format!(
            r#"
            INSERT INTO photos (id, album_id, image, title, description, sort_order, created_at, is_cover_candidate)
            SELECT $1, a.id, $3, $4, $5, $6, $7, $8 FROM albums a WHERE a.id = $2
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(photo.album_id)
        .bind(&photo.image)
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(photo.sort_order)
        .bind(Utc::now())
        .bind(photo.is_cover_candidate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Photo::from))
    }

    async fn delete_photo(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_published_videos(&self, page: PageRequest) -> Result<Page<Video>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos WHERE is_published")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, DbVideo>(&format!(
            r#"
            SELECT {} FROM videos
            WHERE is_published
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            VIDEO_COLUMNS
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let videos = self.hydrate_videos(rows).await?;
        Ok(Page::new(videos, page, total as u64))
    }

    async fn create_video(&self, video: &CreateVideoRequest) -> Result<Video> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbVideo>(&format!(
            r#"
            INSERT INTO videos (id, title, video_file, youtube_url, thumbnail, description, is_published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(id)
        .bind(&video.title)
        .bind(&video.video_file)
        .bind(&video.youtube_url)
        .bind(&video.thumbnail)
        .bind(&video.description)
        .bind(video.is_published)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(Tagged::Video.link())
            .bind(id)
            .bind(&video.shooting_type_ids[..])
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut videos = self.hydrate_videos(vec![row]).await?;
        videos
            .pop()
            .ok_or_else(|| eyre::eyre!("Video {} vanished after insert", id))
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
