use arrest_core::AppError;
use arrest_models::arrests::{Arrest, CreateArrestRequest};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

pub struct ArrestService;

impl ArrestService {
    #[instrument(skip(db, dto), fields(organization = %dto.organization_code))]
    pub async fn create_arrest(
        db: &PgPool,
        created_by: Uuid,
        dto: CreateArrestRequest,
    ) -> Result<Arrest, AppError> {
        let arrested_at = dto.arrested_at.unwrap_or_else(chrono::Utc::now);

        let arrest = sqlx::query_as::<_, Arrest>(
            "INSERT INTO arrests
                 (id, first_name, last_name, personal_number, organization_code, reason, arrested_at, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, first_name, last_name, personal_number, organization_code, reason,
                       arrested_at, created_by, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.personal_number)
        .bind(dto.organization_code)
        .bind(&dto.reason)
        .bind(arrested_at)
        .bind(created_by)
        .fetch_one(db)
        .await?;

        tracing::info!(arrest_id = %arrest.id, "Arrest recorded");
        Ok(arrest)
    }

    /// Fails with 500 if the stored organization code is not a known member.
    #[instrument(skip(db))]
    pub async fn get_arrest(db: &PgPool, id: Uuid) -> Result<Arrest, AppError> {
        sqlx::query_as::<_, Arrest>(
            "SELECT id, first_name, last_name, personal_number, organization_code, reason,
                    arrested_at, created_by, created_at
             FROM arrests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Arrest not found")))
    }
}
