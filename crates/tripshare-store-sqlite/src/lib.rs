//! SQLite implementation of the tripshare [`Store`].
//!
//! Schema changes ship as versioned migrations that run once when the store is opened;
//! nothing here alters the schema in response to a request.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tripshare_storage::{
    CreateDocumentParams, CreateInvitationParams, CreateTravelItemParams, CreateTripParams,
    CreateUserParams, Document, DocumentId, Invitation, InvitationId, MemberRole, Membership,
    RedeemInvitationParams, Store, StoreError, TravelItem, TravelItemId, Trip, TripId,
    UpsertMembershipParams, User, UserId,
};
use uuid::Uuid;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const TRIP_COLUMNS: &str = "id, name, owner_id, share_token, is_publicly_shared, created_at";
const INVITATION_COLUMNS: &str =
    "id, trip_id, code, created_by, role, expires_at, max_uses, current_uses, created_at";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        // Every connection to `:memory:` is a separate database, so pin the pool to one.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(backend)?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(backend)?;
        Self::migrate(pool).await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        Self::open_with_timeout(url, Duration::from_secs(10)).await
    }

    /// Open a database file, waiting at most `timeout` for a pooled connection or a lock.
    pub async fn open_with_timeout(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(backend)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(timeout);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await
            .map_err(backend)?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, StoreError> {
        MIGRATOR.run(&pool).await.map_err(backend)?;
        Ok(Self { pool })
    }
}

// ──────────────────────────────── Row mapping ────────────────────────────────

fn backend(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn unique_or_backend(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::AlreadyExists,
        _ => backend(e),
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, StoreError> {
    Uuid::try_parse(s).map_err(backend)
}

fn parse_role(s: &str) -> Result<MemberRole, StoreError> {
    MemberRole::from_str(s).map_err(|e| StoreError::Backend(format!("invalid role in database: {}", e)))
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| StoreError::Backend(format!("invalid timestamp in database: {}", ms)))
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    created_at: i64,
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        Ok(User {
            id: UserId(parse_uuid(&self.id)?),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: from_millis(self.created_at)?,
        })
    }
}

#[derive(FromRow)]
struct TripRow {
    id: String,
    name: String,
    owner_id: String,
    share_token: Option<String>,
    is_publicly_shared: bool,
    created_at: i64,
}

impl TripRow {
    fn into_trip(self) -> Result<Trip, StoreError> {
        Ok(Trip {
            id: TripId(parse_uuid(&self.id)?),
            name: self.name,
            owner_id: UserId(parse_uuid(&self.owner_id)?),
            share_token: self.share_token,
            is_publicly_shared: self.is_publicly_shared,
            created_at: from_millis(self.created_at)?,
        })
    }
}

#[derive(FromRow)]
struct MembershipRow {
    trip_id: String,
    user_id: String,
    role: String,
    invited_by: String,
    joined_at: i64,
}

impl MembershipRow {
    fn into_membership(self) -> Result<Membership, StoreError> {
        Ok(Membership {
            trip_id: TripId(parse_uuid(&self.trip_id)?),
            user_id: UserId(parse_uuid(&self.user_id)?),
            role: parse_role(&self.role)?,
            invited_by: UserId(parse_uuid(&self.invited_by)?),
            joined_at: from_millis(self.joined_at)?,
        })
    }
}

#[derive(FromRow)]
struct InvitationRow {
    id: String,
    trip_id: String,
    code: String,
    created_by: String,
    role: String,
    expires_at: Option<i64>,
    max_uses: Option<i64>,
    current_uses: i64,
    created_at: i64,
}

impl InvitationRow {
    fn into_invitation(self) -> Result<Invitation, StoreError> {
        Ok(Invitation {
            id: InvitationId(parse_uuid(&self.id)?),
            trip_id: TripId(parse_uuid(&self.trip_id)?),
            code: self.code,
            created_by: UserId(parse_uuid(&self.created_by)?),
            role: parse_role(&self.role)?,
            expires_at: self.expires_at.map(from_millis).transpose()?,
            max_uses: self
                .max_uses
                .map(|n| u32::try_from(n).map_err(backend))
                .transpose()?,
            current_uses: u32::try_from(self.current_uses).map_err(backend)?,
            created_at: from_millis(self.created_at)?,
        })
    }
}

#[derive(FromRow)]
struct TravelItemRow {
    id: String,
    trip_id: String,
    title: String,
    starts_at: Option<i64>,
    created_at: i64,
}

impl TravelItemRow {
    fn into_item(self) -> Result<TravelItem, StoreError> {
        Ok(TravelItem {
            id: TravelItemId(parse_uuid(&self.id)?),
            trip_id: TripId(parse_uuid(&self.trip_id)?),
            title: self.title,
            starts_at: self.starts_at.map(from_millis).transpose()?,
            created_at: from_millis(self.created_at)?,
        })
    }
}

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    trip_id: String,
    file_name: String,
    created_at: i64,
}

impl DocumentRow {
    fn into_document(self) -> Result<Document, StoreError> {
        Ok(Document {
            id: DocumentId(parse_uuid(&self.id)?),
            trip_id: TripId(parse_uuid(&self.trip_id)?),
            file_name: self.file_name,
            created_at: from_millis(self.created_at)?,
        })
    }
}

// ──────────────────────────── Shared statements ─────────────────────────────

async fn fetch_trip(conn: &mut SqliteConnection, trip_id: &TripId) -> Result<Trip, StoreError> {
    sqlx::query_as::<_, TripRow>(&format!("SELECT {} FROM trips WHERE id = ?", TRIP_COLUMNS))
        .bind(trip_id.0.to_string())
        .fetch_optional(&mut *conn)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_trip()
}

/// Upsert guarded against the owner: the insert only happens when the trip exists and is
/// owned by someone else.
async fn upsert_membership_on(
    conn: &mut SqliteConnection,
    params: &UpsertMembershipParams,
) -> Result<Membership, StoreError> {
    let trip_id = params.trip_id.0.to_string();
    let user_id = params.user_id.0.to_string();

    let result = sqlx::query(
        "INSERT INTO memberships(trip_id, user_id, role, invited_by, joined_at)
         SELECT ?, ?, ?, ?, ?
          WHERE EXISTS (SELECT 1 FROM trips WHERE id = ? AND owner_id <> ?)
         ON CONFLICT(trip_id, user_id)
         DO UPDATE SET role = excluded.role,
                       invited_by = excluded.invited_by",
    )
    .bind(&trip_id)
    .bind(&user_id)
    .bind(params.role.as_str())
    .bind(params.invited_by.0.to_string())
    .bind(Utc::now().timestamp_millis())
    .bind(&trip_id)
    .bind(&user_id)
    .execute(&mut *conn)
    .await
    .map_err(backend)?;

    if result.rows_affected() == 0 {
        // Either the trip is gone or the user owns it.
        fetch_trip(conn, &params.trip_id).await?;
        return Err(StoreError::Conflict);
    }

    sqlx::query_as::<_, MembershipRow>(
        "SELECT trip_id, user_id, role, invited_by, joined_at
           FROM memberships WHERE trip_id = ? AND user_id = ?",
    )
    .bind(&trip_id)
    .bind(&user_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(backend)?
    .into_membership()
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    // ───────────────────────────── Users ─────────────────────────────

    async fn create_user(&self, params: &CreateUserParams) -> Result<User, StoreError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now().timestamp_millis();
        sqlx::query(
            "INSERT INTO users(id, email, first_name, last_name, created_at) VALUES(?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&params.email)
        .bind(&params.first_name)
        .bind(&params.last_name)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(unique_or_backend)?;

        Ok(User {
            id: UserId(id),
            email: params.email.clone(),
            first_name: params.first_name.clone(),
            last_name: params.last_name.clone(),
            created_at: from_millis(created_at)?,
        })
    }

    async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, StoreError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, email, first_name, last_name, created_at FROM users WHERE id = ?",
        )
        .bind(user_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_user()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, email, first_name, last_name, created_at FROM users WHERE email = ?",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_user()
    }

    // ───────────────────────────── Trips ─────────────────────────────

    async fn create_trip(&self, params: &CreateTripParams) -> Result<Trip, StoreError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now().timestamp_millis();
        sqlx::query("INSERT INTO trips(id, name, owner_id, created_at) VALUES(?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(&params.name)
            .bind(params.owner_id.0.to_string())
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(Trip {
            id: TripId(id),
            name: params.name.clone(),
            owner_id: params.owner_id.clone(),
            share_token: None,
            is_publicly_shared: false,
            created_at: from_millis(created_at)?,
        })
    }

    async fn get_trip(&self, trip_id: &TripId) -> Result<Trip, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        fetch_trip(&mut conn, trip_id).await
    }

    async fn list_trips_for_user(&self, user_id: &UserId) -> Result<Vec<Trip>, StoreError> {
        let user_id = user_id.0.to_string();
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {} FROM trips
              WHERE owner_id = ?
                 OR id IN (SELECT trip_id FROM memberships WHERE user_id = ?)
              ORDER BY created_at DESC",
            TRIP_COLUMNS
        ))
        .bind(&user_id)
        .bind(&user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(TripRow::into_trip).collect()
    }

    async fn delete_trip(&self, trip_id: &TripId) -> Result<(), StoreError> {
        let id = trip_id.0.to_string();
        let mut tx = self.pool.begin().await.map_err(backend)?;

        for stmt in [
            "DELETE FROM memberships WHERE trip_id = ?",
            "DELETE FROM invitations WHERE trip_id = ?",
            "DELETE FROM travel_items WHERE trip_id = ?",
            "DELETE FROM documents WHERE trip_id = ?",
        ] {
            sqlx::query(stmt)
                .bind(&id)
                .execute(&mut *tx)
                .await
                .map_err(backend)?;
        }

        let result = sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await.map_err(backend)
    }

    // ───────────────────────────── Sharing ─────────────────────────────

    async fn enable_sharing(
        &self,
        trip_id: &TripId,
        candidate_token: &str,
    ) -> Result<Trip, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let result = sqlx::query(
            "UPDATE trips
                SET share_token = COALESCE(share_token, ?),
                    is_publicly_shared = 1
              WHERE id = ?",
        )
        .bind(candidate_token)
        .bind(trip_id.0.to_string())
        .execute(&mut *conn)
        .await
        .map_err(unique_or_backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        fetch_trip(&mut conn, trip_id).await
    }

    async fn disable_sharing(&self, trip_id: &TripId) -> Result<Trip, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let result = sqlx::query("UPDATE trips SET is_publicly_shared = 0 WHERE id = ?")
            .bind(trip_id.0.to_string())
            .execute(&mut *conn)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        fetch_trip(&mut conn, trip_id).await
    }

    async fn replace_share_token(
        &self,
        trip_id: &TripId,
        token: &str,
    ) -> Result<Trip, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let result = sqlx::query("UPDATE trips SET share_token = ? WHERE id = ?")
            .bind(token)
            .bind(trip_id.0.to_string())
            .execute(&mut *conn)
            .await
            .map_err(unique_or_backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        fetch_trip(&mut conn, trip_id).await
    }

    async fn get_shared_trip(&self, token: &str) -> Result<Trip, StoreError> {
        sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {} FROM trips WHERE share_token = ? AND is_publicly_shared = 1",
            TRIP_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_trip()
    }

    // ───────────────────────────── Memberships ─────────────────────────────

    async fn get_membership(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
    ) -> Result<Membership, StoreError> {
        sqlx::query_as::<_, MembershipRow>(
            "SELECT trip_id, user_id, role, invited_by, joined_at
               FROM memberships WHERE trip_id = ? AND user_id = ?",
        )
        .bind(trip_id.0.to_string())
        .bind(user_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_membership()
    }

    async fn upsert_membership(
        &self,
        params: &UpsertMembershipParams,
    ) -> Result<Membership, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        upsert_membership_on(&mut conn, params).await
    }

    async fn delete_membership(
        &self,
        trip_id: &TripId,
        user_id: &UserId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM memberships WHERE trip_id = ? AND user_id = ?")
            .bind(trip_id.0.to_string())
            .bind(user_id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_memberships(&self, trip_id: &TripId) -> Result<Vec<Membership>, StoreError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT trip_id, user_id, role, invited_by, joined_at
               FROM memberships WHERE trip_id = ?
              ORDER BY joined_at ASC, rowid ASC",
        )
        .bind(trip_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(MembershipRow::into_membership).collect()
    }

    // ───────────────────────────── Invitations ─────────────────────────────

    async fn create_invitation(
        &self,
        params: &CreateInvitationParams,
    ) -> Result<Invitation, StoreError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now().timestamp_millis();
        sqlx::query(
            "INSERT INTO invitations(id, trip_id, code, created_by, role, expires_at, max_uses, current_uses, created_at)
             VALUES(?, ?, ?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(id.to_string())
        .bind(params.trip_id.0.to_string())
        .bind(&params.code)
        .bind(params.created_by.0.to_string())
        .bind(params.role.as_str())
        .bind(params.expires_at.map(|t| t.timestamp_millis()))
        .bind(params.max_uses.map(i64::from))
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(unique_or_backend)?;

        Ok(Invitation {
            id: InvitationId(id),
            trip_id: params.trip_id.clone(),
            code: params.code.clone(),
            created_by: params.created_by.clone(),
            role: params.role,
            // Round-trip through millis so the returned value matches later reads.
            expires_at: params
                .expires_at
                .map(|t| from_millis(t.timestamp_millis()))
                .transpose()?,
            max_uses: params.max_uses,
            current_uses: 0,
            created_at: from_millis(created_at)?,
        })
    }

    async fn get_invitation(&self, invitation_id: &InvitationId) -> Result<Invitation, StoreError> {
        sqlx::query_as::<_, InvitationRow>(&format!(
            "SELECT {} FROM invitations WHERE id = ?",
            INVITATION_COLUMNS
        ))
        .bind(invitation_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_invitation()
    }

    async fn get_invitation_by_code(&self, code: &str) -> Result<Invitation, StoreError> {
        sqlx::query_as::<_, InvitationRow>(&format!(
            "SELECT {} FROM invitations WHERE code = ?",
            INVITATION_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_invitation()
    }

    async fn list_invitations(&self, trip_id: &TripId) -> Result<Vec<Invitation>, StoreError> {
        let rows = sqlx::query_as::<_, InvitationRow>(&format!(
            "SELECT {} FROM invitations WHERE trip_id = ? ORDER BY created_at DESC, rowid DESC",
            INVITATION_COLUMNS
        ))
        .bind(trip_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(InvitationRow::into_invitation).collect()
    }

    async fn delete_invitation(&self, invitation_id: &InvitationId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = ?")
            .bind(invitation_id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }

    async fn redeem_invitation(
        &self,
        params: &RedeemInvitationParams,
    ) -> Result<Membership, StoreError> {
        let invitation_id = params.invitation_id.0.to_string();
        let mut tx = self.pool.begin().await.map_err(backend)?;

        // The claim takes the write lock first, so concurrent redeemers queue behind it and
        // see the incremented counter.
        let claimed = sqlx::query(
            "UPDATE invitations
                SET current_uses = current_uses + 1
              WHERE id = ?
                AND (max_uses IS NULL OR current_uses < max_uses)
                AND (expires_at IS NULL OR expires_at > ?)",
        )
        .bind(&invitation_id)
        .bind(params.now.timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(backend)?;

        if claimed.rows_affected() == 0 {
            return Err(StoreError::Conflict);
        }

        let (trip_id, role, created_by) = sqlx::query_as::<_, (String, String, String)>(
            "SELECT trip_id, role, created_by FROM invitations WHERE id = ?",
        )
        .bind(&invitation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(backend)?;

        let membership = upsert_membership_on(
            &mut tx,
            &UpsertMembershipParams {
                trip_id: TripId(parse_uuid(&trip_id)?),
                user_id: params.user_id.clone(),
                role: parse_role(&role)?,
                invited_by: UserId(parse_uuid(&created_by)?),
            },
        )
        .await?;

        tx.commit().await.map_err(backend)?;
        Ok(membership)
    }

    // ───────────────────────────── Travel items ─────────────────────────────

    async fn create_travel_item(
        &self,
        params: &CreateTravelItemParams,
    ) -> Result<TravelItem, StoreError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now().timestamp_millis();
        sqlx::query(
            "INSERT INTO travel_items(id, trip_id, title, starts_at, created_at) VALUES(?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(params.trip_id.0.to_string())
        .bind(&params.title)
        .bind(params.starts_at.map(|t| t.timestamp_millis()))
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(TravelItem {
            id: TravelItemId(id),
            trip_id: params.trip_id.clone(),
            title: params.title.clone(),
            starts_at: params
                .starts_at
                .map(|t| from_millis(t.timestamp_millis()))
                .transpose()?,
            created_at: from_millis(created_at)?,
        })
    }

    async fn get_travel_item(&self, item_id: &TravelItemId) -> Result<TravelItem, StoreError> {
        sqlx::query_as::<_, TravelItemRow>(
            "SELECT id, trip_id, title, starts_at, created_at FROM travel_items WHERE id = ?",
        )
        .bind(item_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_item()
    }

    async fn list_travel_items(&self, trip_id: &TripId) -> Result<Vec<TravelItem>, StoreError> {
        let rows = sqlx::query_as::<_, TravelItemRow>(
            "SELECT id, trip_id, title, starts_at, created_at
               FROM travel_items WHERE trip_id = ?
              ORDER BY starts_at IS NULL, starts_at ASC, created_at ASC",
        )
        .bind(trip_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(TravelItemRow::into_item).collect()
    }

    async fn delete_travel_item(&self, item_id: &TravelItemId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM travel_items WHERE id = ?")
            .bind(item_id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }

    // ───────────────────────────── Documents ─────────────────────────────

    async fn create_document(&self, params: &CreateDocumentParams) -> Result<Document, StoreError> {
        let id = Uuid::now_v7();
        let created_at = Utc::now().timestamp_millis();
        sqlx::query("INSERT INTO documents(id, trip_id, file_name, created_at) VALUES(?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(params.trip_id.0.to_string())
            .bind(&params.file_name)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(Document {
            id: DocumentId(id),
            trip_id: params.trip_id.clone(),
            file_name: params.file_name.clone(),
            created_at: from_millis(created_at)?,
        })
    }

    async fn get_document(&self, document_id: &DocumentId) -> Result<Document, StoreError> {
        sqlx::query_as::<_, DocumentRow>(
            "SELECT id, trip_id, file_name, created_at FROM documents WHERE id = ?",
        )
        .bind(document_id.0.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?
        .into_document()
    }

    async fn list_documents(&self, trip_id: &TripId) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, trip_id, file_name, created_at
               FROM documents WHERE trip_id = ? ORDER BY created_at ASC",
        )
        .bind(trip_id.0.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(DocumentRow::into_document).collect()
    }

    async fn delete_document(&self, document_id: &DocumentId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(document_id.0.to_string())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            Err(StoreError::NotFound)
        } else {
            Ok(())
        }
    }
}
