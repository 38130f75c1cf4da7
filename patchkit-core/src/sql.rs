//! sqlx integration
//!
//! Lets `Nullable<T>` be bound as a query argument and read from a row
//! (`FromRow`, `Row::try_get`) for any database and any `T` sqlx already
//! supports. A NULL column always decodes to `Nullable::Null`, a value
//! column to `Nullable::Present`.

use sqlx::decode::Decode;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::{Database, Type, TypeInfo, ValueRef};

use crate::nullable::Nullable;

impl<T, DB> Type<DB> for Nullable<T>
where
    T: Type<DB>,
    DB: Database,
{
    fn type_info() -> DB::TypeInfo {
        T::type_info()
    }

    fn compatible(ty: &DB::TypeInfo) -> bool {
        ty.is_null() || T::compatible(ty)
    }
}

impl<'q, T, DB> Encode<'q, DB> for Nullable<T>
where
    T: Encode<'q, DB>,
    DB: Database,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            Self::Present(value) => value.encode_by_ref(buf),
            _ => Ok(IsNull::Yes),
        }
    }

    fn produces(&self) -> Option<DB::TypeInfo> {
        self.data().and_then(|value| value.produces())
    }

    fn size_hint(&self) -> usize {
        self.data().map_or(0, |value| value.size_hint())
    }
}

impl<'r, T, DB> Decode<'r, DB> for Nullable<T>
where
    T: Decode<'r, DB>,
    DB: Database,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            Ok(Self::Null)
        } else {
            T::decode(value).map(Self::Present)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::{PgPool, Postgres};

    #[test]
    fn type_info_follows_inner() {
        assert_eq!(
            <Nullable<i64> as Type<Postgres>>::type_info(),
            <i64 as Type<Postgres>>::type_info()
        );
        let text = <String as Type<Postgres>>::type_info();
        assert!(<Nullable<String> as Type<Postgres>>::compatible(&text));
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p patchkit-core -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn round_trips_null_and_value() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("pool creation failed");

        let (null, value): (Nullable<i64>, Nullable<i64>) = sqlx::query_as("SELECT $1, $2")
            .bind(Nullable::<i64>::null())
            .bind(Nullable::of(42_i64))
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(null, Nullable::Null);
        assert_eq!(value, Nullable::of(42));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn text_column_into_string() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("pool creation failed");

        let (name,): (Nullable<String>,) = sqlx::query_as("SELECT 'ha noi'::text")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(name, Nullable::of("ha noi".to_string()));
    }
}
