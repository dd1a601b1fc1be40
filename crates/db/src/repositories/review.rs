use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;
use framed_core::models::{
    pagination::{Page, PageRequest},
    review::{
        CreateReviewRequest, CreateSocialReviewRequest, ModerationAction, Review, ReviewStatus,
        SocialReview,
    },
};
use uuid::Uuid;

use super::{PgStore, ReviewRepository};
use crate::models::{DbReview, DbSocialReview};

const REVIEW_COLUMNS: &str =
    "id, author, email, rating, text, photo, is_public, status, created_at";

const SOCIAL_REVIEW_COLUMNS: &str = "id, source, external_id, author, text, rating, \
     photo_url, post_url, created_at, imported_at";

#[async_trait]
impl ReviewRepository for PgStore {
    async fn create_review(&self, review: &CreateReviewRequest) -> Result<Review> {
        let row = sqlx::query_as::<_, DbReview>(&format!(
            r#"
            INSERT INTO reviews (id, author, email, rating, text, photo, is_public, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(review.author.trim())
        .bind(review.email.trim())
        .bind(review.rating)
        .bind(&review.text)
        .bind(&review.photo)
        .bind(ReviewStatus::Pending.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_public_reviews(&self, page: PageRequest) -> Result<Page<Review>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reviews WHERE status = 'approved' AND is_public",
        )
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, DbReview>(&format!(
            r#"
            SELECT {} FROM reviews
            WHERE status = 'approved' AND is_public
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            REVIEW_COLUMNS
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Page::new(items, page, total as u64))
    }

    async fn list_reviews(&self, status: Option<ReviewStatus>) -> Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, DbReview>(&format!(
            r#"
            SELECT {} FROM reviews
            WHERE ($1::VARCHAR IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
            REVIEW_COLUMNS
        ))
        .bind(status.map(|status| status.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn moderate_reviews(&self, ids: &[Uuid], action: ModerationAction) -> Result<u64> {
        let statement = match action {
            ModerationAction::Approve => "UPDATE reviews SET status = 'approved' WHERE id = ANY($1)",
            ModerationAction::Reject => "UPDATE reviews SET status = 'rejected' WHERE id = ANY($1)",
            ModerationAction::Publish => "UPDATE reviews SET is_public = TRUE WHERE id = ANY($1)",
            ModerationAction::Unpublish => "UPDATE reviews SET is_public = FALSE WHERE id = ANY($1)",
        };

        let result = sqlx::query(statement).bind(ids).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn create_social_review(
        &self,
        review: &CreateSocialReviewRequest,
    ) -> Result<SocialReview> {
        let row = sqlx::query_as::<_, DbSocialReview>(&format!(
            r#"
            INSERT INTO social_reviews (id, source, external_id, author, text, rating,
                                        photo_url, post_url, created_at, imported_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            SOCIAL_REVIEW_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(review.source.as_str())
        .bind(&review.external_id)
        .bind(&review.author)
        .bind(&review.text)
        .bind(review.rating)
        .bind(&review.photo_url)
        .bind(&review.post_url)
        .bind(review.created_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_social_reviews(&self) -> Result<Vec<SocialReview>> {
        let rows = sqlx::query_as::<_, DbSocialReview>(&format!(
            "SELECT {} FROM social_reviews ORDER BY created_at DESC",
            SOCIAL_REVIEW_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SocialReview::try_from).collect()
    }

    async fn delete_social_review(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM social_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
