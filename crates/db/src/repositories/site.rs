use async_trait::async_trait;
use eyre::Result;
use framed_core::models::site::{
    CreateServiceRequest, Service, SiteSettings, UpdateServiceRequest,
};
use uuid::Uuid;

use super::{PgStore, SiteRepository};
use crate::models::{DbService, DbSiteSettings};

const SETTINGS_COLUMNS: &str =
    "title, phone, email, instagram, telegram, whatsapp, vk, about_text";

const SERVICE_COLUMNS: &str = "id, name, price, description, is_active";

#[async_trait]
impl SiteRepository for PgStore {
    async fn load_site_settings(&self) -> Result<SiteSettings> {
        sqlx::query("INSERT INTO site_settings (id, title) VALUES (1, $1) ON CONFLICT (id) DO NOTHING")
            .bind(SiteSettings::default().title)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<_, DbSiteSettings>(&format!(
            "SELECT {} FROM site_settings WHERE id = 1",
            SETTINGS_COLUMNS
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_site_settings(&self, settings: &SiteSettings) -> Result<SiteSettings> {
        let row = sqlx::query_as::<_, DbSiteSettings>(&format!(
            r#"
            INSERT INTO site_settings (id, title, phone, email, instagram, telegram, whatsapp, vk, about_text)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title, phone = EXCLUDED.phone, email = EXCLUDED.email,
                instagram = EXCLUDED.instagram, telegram = EXCLUDED.telegram,
                whatsapp = EXCLUDED.whatsapp, vk = EXCLUDED.vk, about_text = EXCLUDED.about_text
            RETURNING {}
            "#,
            SETTINGS_COLUMNS
        ))
        .bind(&settings.title)
        .bind(&settings.phone)
        .bind(&settings.email)
        .bind(&settings.instagram)
        .bind(&settings.telegram)
        .bind(&settings.whatsapp)
        .bind(&settings.vk)
        .bind(&settings.about_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_services(&self, active_only: bool) -> Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, DbService>(&format!(
            "SELECT {} FROM services WHERE (NOT $1 OR is_active) ORDER BY price, name",
            SERVICE_COLUMNS
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn create_service(&self, service: &CreateServiceRequest) -> Result<Service> {
        let row = sqlx::query_as::<_, DbService>(&format!(
            r#"
            INSERT INTO services (id, name, price, description, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&service.name)
        .bind(service.price)
        .bind(&service.description)
        .bind(service.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_service(
        &self,
        id: Uuid,
        update: &UpdateServiceRequest,
    ) -> Result<Option<Service>> {
        let row = sqlx::query_as::<_, DbService>(&format!(
            r#"
            UPDATE services
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active)
            WHERE id = $1
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(id)
        .bind(&update.name)
        .bind(update.price)
        .bind(&update.description)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Service::from))
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
