//! MySQL implementation of the UserRepository trait.
//!
//! UUIDs are stored as CHAR(36) strings. Soft-deleted rows stay in the
//! table and are filtered out of every read except the uniqueness
//! checks backing code generation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use kb_core::domain::entities::User;
use kb_core::errors::DomainError;
use kb_core::repositories::{SearchFilter, UserRepository};

const COLUMNS: &str = "id, customer_id, first_name, last_name, gender, marital_status, \
    email, email_valid, email_otp_verified, phone_number, phone_otp_verified, \
    password, pin, bvn, bvn_valid, bvn_otp_verified, fraudulent, \
    home_address, state_of_residence, date_of_birth, no_of_children, payday, \
    net_income, monthly_income, date_of_employment, type_of_employment, industry, \
    employer, employer_address, employer_state, company_name, \
    next_of_kin_title, next_of_kin_name, next_of_kin_relationship, \
    next_of_kin_phone, next_of_kin_address, next_of_kin_state, \
    referral_code, referrer_id, device_id, device_type, source, image, document, \
    tier, language, created_at, updated_at, deleted_at, suspended_at, closed_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = col(row, "id")?;
        let referrer_id: Option<String> = col(row, "referrer_id")?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("invalid user id: {e}")))?,
            customer_id: col(row, "customer_id")?,
            first_name: col(row, "first_name")?,
            last_name: col(row, "last_name")?,
            gender: col(row, "gender")?,
            marital_status: col(row, "marital_status")?,
            email: col(row, "email")?,
            email_valid: col(row, "email_valid")?,
            email_otp_verified: col(row, "email_otp_verified")?,
            phone_number: col(row, "phone_number")?,
            phone_otp_verified: col(row, "phone_otp_verified")?,
            password: col(row, "password")?,
            pin: col(row, "pin")?,
            bvn: col(row, "bvn")?,
            bvn_valid: col(row, "bvn_valid")?,
            bvn_otp_verified: col(row, "bvn_otp_verified")?,
            fraudulent: col(row, "fraudulent")?,
            home_address: col(row, "home_address")?,
            state_of_residence: col(row, "state_of_residence")?,
            date_of_birth: col(row, "date_of_birth")?,
            no_of_children: col(row, "no_of_children")?,
            payday: col(row, "payday")?,
            net_income: col(row, "net_income")?,
            monthly_income: col(row, "monthly_income")?,
            date_of_employment: col(row, "date_of_employment")?,
            type_of_employment: col(row, "type_of_employment")?,
            industry: col(row, "industry")?,
            employer: col(row, "employer")?,
            employer_address: col(row, "employer_address")?,
            employer_state: col(row, "employer_state")?,
            company_name: col(row, "company_name")?,
            next_of_kin_title: col(row, "next_of_kin_title")?,
            next_of_kin_name: col(row, "next_of_kin_name")?,
            next_of_kin_relationship: col(row, "next_of_kin_relationship")?,
            next_of_kin_phone: col(row, "next_of_kin_phone")?,
            next_of_kin_address: col(row, "next_of_kin_address")?,
            next_of_kin_state: col(row, "next_of_kin_state")?,
            referral_code: col(row, "referral_code")?,
            referrer_id: referrer_id
                .map(|v| {
                    Uuid::parse_str(&v)
                        .map_err(|e| DomainError::Database(format!("invalid referrer id: {e}")))
                })
                .transpose()?,
            device_id: col(row, "device_id")?,
            device_type: col(row, "device_type")?,
            source: col(row, "source")?,
            image: col(row, "image")?,
            document: col(row, "document")?,
            tier: col(row, "tier")?,
            language: col(row, "language")?,
            created_at: col::<DateTime<Utc>>(row, "created_at")?,
            updated_at: col::<DateTime<Utc>>(row, "updated_at")?,
            deleted_at: col(row, "deleted_at")?,
            suspended_at: col(row, "suspended_at")?,
            closed_at: col(row, "closed_at")?,
        })
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        binds: &[&str],
    ) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL AND {condition} LIMIT 1"
        );
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        let result = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {e}")))?;
        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_where(&self, condition: &str, bind: &str) -> Result<bool, DomainError> {
        // deleted rows still hold their codes, so they stay in scope
        let sql = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {condition}) AS hit");
        let row = sqlx::query(&sql)
            .bind(bind)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("existence check failed: {e}")))?;
        let hit: i8 = row
            .try_get("hit")
            .map_err(|e| DomainError::Database(format!("failed to read existence flag: {e}")))?;
        Ok(hit == 1)
    }
}

fn col<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &'static str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::Database(format!("failed to read column {name}: {e}")))
}

fn push_filter(qb: &mut QueryBuilder<'_, MySql>, filter: &SearchFilter) {
    qb.push(" WHERE deleted_at IS NULL");
    if let Some(query) = &filter.query {
        let like = format!("%{query}%");
        qb.push(" AND (first_name LIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR last_name LIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR phone_number LIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR email LIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR bvn LIKE ");
        qb.push_bind(like.clone());
        qb.push(" OR customer_id LIKE ");
        qb.push_bind(like);
        qb.push(")");
    }
    if let Some(from) = filter.from {
        qb.push(" AND created_at >= ");
        qb.push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND created_at <= ");
        qb.push_bind(to);
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("id = ?", &[&id.to_string()]).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ?", &[email]).await
    }

    async fn find_by_phone(
        &self,
        raw: &str,
        canonical: &str,
    ) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("(phone_number = ? OR phone_number = ?)", &[raw, canonical])
            .await
    }

    async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("referral_code = ?", &[code]).await
    }

    async fn exists_by_referral_code(&self, code: &str) -> Result<bool, DomainError> {
        self.exists_where("referral_code = ?", code).await
    }

    async fn exists_by_customer_id(&self, customer_id: &str) -> Result<bool, DomainError> {
        self.exists_where("customer_id = ?", customer_id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users ({COLUMNS}) VALUES (\
             ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
             ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
             ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
             ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
             ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        sqlx::query(&sql)
            .bind(user.id.to_string())
            .bind(&user.customer_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.gender)
            .bind(&user.marital_status)
            .bind(&user.email)
            .bind(user.email_valid)
            .bind(user.email_otp_verified)
            .bind(&user.phone_number)
            .bind(user.phone_otp_verified)
            .bind(&user.password)
            .bind(&user.pin)
            .bind(&user.bvn)
            .bind(user.bvn_valid)
            .bind(user.bvn_otp_verified)
            .bind(user.fraudulent)
            .bind(&user.home_address)
            .bind(&user.state_of_residence)
            .bind(user.date_of_birth)
            .bind(user.no_of_children)
            .bind(user.payday)
            .bind(user.net_income)
            .bind(user.monthly_income)
            .bind(user.date_of_employment)
            .bind(&user.type_of_employment)
            .bind(&user.industry)
            .bind(&user.employer)
            .bind(&user.employer_address)
            .bind(&user.employer_state)
            .bind(&user.company_name)
            .bind(&user.next_of_kin_title)
            .bind(&user.next_of_kin_name)
            .bind(&user.next_of_kin_relationship)
            .bind(&user.next_of_kin_phone)
            .bind(&user.next_of_kin_address)
            .bind(&user.next_of_kin_state)
            .bind(&user.referral_code)
            .bind(user.referrer_id.map(|v| v.to_string()))
            .bind(&user.device_id)
            .bind(&user.device_type)
            .bind(&user.source)
            .bind(&user.image)
            .bind(&user.document)
            .bind(user.tier)
            .bind(&user.language)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.deleted_at)
            .bind(user.suspended_at)
            .bind(user.closed_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("failed to create user: {e}")))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let sql = "UPDATE users SET \
            customer_id = ?, first_name = ?, last_name = ?, gender = ?, marital_status = ?, \
            email = ?, email_valid = ?, email_otp_verified = ?, \
            phone_number = ?, phone_otp_verified = ?, \
            password = ?, pin = ?, bvn = ?, bvn_valid = ?, bvn_otp_verified = ?, fraudulent = ?, \
            home_address = ?, state_of_residence = ?, date_of_birth = ?, no_of_children = ?, \
            payday = ?, net_income = ?, monthly_income = ?, date_of_employment = ?, \
            type_of_employment = ?, industry = ?, employer = ?, employer_address = ?, \
            employer_state = ?, company_name = ?, \
            next_of_kin_title = ?, next_of_kin_name = ?, next_of_kin_relationship = ?, \
            next_of_kin_phone = ?, next_of_kin_address = ?, next_of_kin_state = ?, \
            referral_code = ?, referrer_id = ?, device_id = ?, device_type = ?, source = ?, \
            image = ?, document = ?, tier = ?, language = ?, \
            updated_at = ?, deleted_at = ?, suspended_at = ?, closed_at = ? \
            WHERE id = ?";

        let result = sqlx::query(sql)
            .bind(&user.customer_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.gender)
            .bind(&user.marital_status)
            .bind(&user.email)
            .bind(user.email_valid)
            .bind(user.email_otp_verified)
            .bind(&user.phone_number)
            .bind(user.phone_otp_verified)
            .bind(&user.password)
            .bind(&user.pin)
            .bind(&user.bvn)
            .bind(user.bvn_valid)
            .bind(user.bvn_otp_verified)
            .bind(user.fraudulent)
            .bind(&user.home_address)
            .bind(&user.state_of_residence)
            .bind(user.date_of_birth)
            .bind(user.no_of_children)
            .bind(user.payday)
            .bind(user.net_income)
            .bind(user.monthly_income)
            .bind(user.date_of_employment)
            .bind(&user.type_of_employment)
            .bind(&user.industry)
            .bind(&user.employer)
            .bind(&user.employer_address)
            .bind(&user.employer_state)
            .bind(&user.company_name)
            .bind(&user.next_of_kin_title)
            .bind(&user.next_of_kin_name)
            .bind(&user.next_of_kin_relationship)
            .bind(&user.next_of_kin_phone)
            .bind(&user.next_of_kin_address)
            .bind(&user.next_of_kin_state)
            .bind(&user.referral_code)
            .bind(user.referrer_id.map(|v| v.to_string()))
            .bind(&user.device_id)
            .bind(&user.device_type)
            .bind(&user.source)
            .bind(&user.image)
            .bind(&user.document)
            .bind(user.tier)
            .bind(&user.language)
            .bind(user.updated_at)
            .bind(user.deleted_at)
            .bind(user.suspended_at)
            .bind(user.closed_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("failed to update user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }

    async fn search(
        &self,
        filter: &SearchFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, DomainError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM users"));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("search failed: {e}")))?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn count(&self, filter: &SearchFilter) -> Result<u64, DomainError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("count failed: {e}")))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_sql_shape() {
        let filter = SearchFilter {
            query: Some("ada".to_string()),
            from: Some(Utc::now()),
            to: None,
        };
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filter(&mut qb, &filter);
        let sql = qb.sql();
        assert!(sql.contains("deleted_at IS NULL"));
        assert!(sql.contains("first_name LIKE"));
        assert!(sql.contains("customer_id LIKE"));
        assert!(sql.contains("created_at >="));
        assert!(!sql.contains("created_at <="));
    }

    #[test]
    fn test_filter_without_query_only_excludes_deleted() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filter(&mut qb, &SearchFilter::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
    }
}
