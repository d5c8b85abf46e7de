//! # MongoDB 사용자 리포지토리
//!
//! - **컬렉션**: `users` (`_id`는 정수 ID)
//! - **ID 발급**: `counters` 컬렉션의 `{ _id: "users", seq }` 문서를 `$inc` upsert
//! - **인덱스**: email(unique, sparse), fb_id(unique, sparse)
//!
//! 캐시를 두지 않습니다. refresh secret을 캐시하면 교체 직후에도
//! 폐기된 리프레시 토큰이 통과할 수 있기 때문입니다.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use super::user_store::{UserRepository, UserStore};
use crate::db::Database;
use crate::domain::entities::users::{NewUser, User};
use crate::errors::{AppError, AppResult};

const DUPLICATE_KEY: i32 = 11000;

fn db_error(e: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

/// MongoDB 기반 사용자 리포지토리
#[derive(Clone)]
pub struct MongoUserRepository {
    users: Collection<User>,
    counters: Collection<Document>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        let db = database.get_database();

        Self {
            users: db.collection::<User>("users"),
            counters: db.collection::<Document>("counters"),
        }
    }

    /// 다음 사용자 ID를 원자적으로 발급합니다.
    async fn next_user_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": "users" }, doc! { "$inc": { "seq": 1_i64 } })
            .with_options(options)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::DatabaseError("사용자 ID 카운터가 없습니다".to_string()))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("사용자 ID 카운터 형식 오류: {}", e)))
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 서버 기동 시 한 번 호출합니다. 이미 존재하는 인덱스는 그대로 둡니다.
    ///
    /// # 주의사항
    ///
    /// 기존 데이터에 중복 이메일이 있으면 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let fb_id_index = IndexModel::builder()
            .keys(doc! { "fb_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("fb_id_unique".to_string())
                    .build(),
            )
            .build();

        self.users
            .create_indexes([email_index, fb_id_index])
            .await
            .map_err(db_error)?;

        log::info!("사용자 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        self.users
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(db_error)
    }

    async fn find_by_fb_id_or_email(
        &self,
        fb_id: &str,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        // fb_id 일치를 e-mail 일치보다 우선
        let by_fb_id = self
            .users
            .find_one(doc! { "fb_id": fb_id })
            .await
            .map_err(db_error)?;
        if by_fb_id.is_some() {
            return Ok(by_fb_id);
        }

        match email {
            Some(email) => self.find_by_email(email).await,
            None => Ok(None),
        }
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let id = self.next_user_id().await?;
        let user = new_user.into_user(id);

        self.users.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError("이미 사용 중인 이메일 또는 Facebook 계정입니다".to_string())
            } else {
                db_error(e)
            }
        })?;

        log::info!("사용자 생성: ID {}", user.id);
        Ok(user)
    }

    async fn link_facebook(&self, id: i64, fb_id: &str) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.users
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "fb_id": fb_id, "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이미 다른 계정에 연결된 Facebook 계정입니다".to_string())
                } else {
                    db_error(e)
                }
            })
    }

    async fn update_password(
        &self,
        id: i64,
        password_hash: &str,
        refresh_secret: &str,
    ) -> AppResult<bool> {
        let result = self
            .users
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "password_hash": password_hash,
                    "refresh_secret": refresh_secret,
                    "updated_at": DateTime::now(),
                } },
            )
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }

    async fn rotate_refresh_secret(&self, id: i64, refresh_secret: &str) -> AppResult<bool> {
        let result = self
            .users
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "refresh_secret": refresh_secret, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(db_error)?;

        Ok(result.matched_count > 0)
    }
}
