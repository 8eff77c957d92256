//! Tests against a live MySQL server.
//!
//! Ignored by default. Run with a scratch database:
//!
//! ```text
//! TEST_DATABASE_URL=mysql://root@127.0.0.1:3306/coursedb_test \
//!     cargo test --test mysql_store -- --ignored --test-threads=1
//! ```

#![allow(clippy::panic)]

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;

use employee_api::domain::Employee;
use employee_api::persistence::{EmployeeStore, MySqlEmployeeStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS employee (\
    id INT PRIMARY KEY, first_name VARCHAR(255), last_name VARCHAR(255), age INT, \
    email VARCHAR(255), phone VARCHAR(64), cid VARCHAR(64), position VARCHAR(255))";

async fn fresh_store() -> MySqlEmployeeStore {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        panic!("TEST_DATABASE_URL must be set");
    };
    let Ok(pool) = MySqlPoolOptions::new().max_connections(2).connect(&url).await else {
        panic!("cannot connect to {url}");
    };
    let Ok(_) = sqlx::query(CREATE_TABLE).execute(&pool).await else {
        panic!("cannot create employee table");
    };
    let Ok(_) = sqlx::query("DELETE FROM employee").execute(&pool).await else {
        panic!("cannot clear employee table");
    };
    MySqlEmployeeStore::new(pool, Duration::from_secs(3))
}

fn employee(id: i64) -> Employee {
    Employee {
        id,
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        age: 30,
        email: "a@x.com".to_string(),
        phone: "555".to_string(),
        cid: "C1".to_string(),
        position: "eng".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn insert_get_update_remove() {
    let store = fresh_store().await;

    let Ok(rows) = store.list_employees().await else {
        panic!("list failed");
    };
    assert!(rows.is_empty());

    let Ok(_) = store.insert_employee(&employee(1)).await else {
        panic!("insert failed");
    };
    let Ok(fetched) = store.get_employee(1).await else {
        panic!("get failed");
    };
    assert_eq!(fetched, Some(employee(1)));

    assert!(store.insert_employee(&employee(1)).await.is_err());

    let Ok(_) = store.update_employee(77, &employee(77)).await else {
        panic!("update of missing row should succeed");
    };
    let Ok(missing) = store.get_employee(77).await else {
        panic!("get failed");
    };
    assert!(missing.is_none());

    let Ok(_) = store.remove_employee(1).await else {
        panic!("remove failed");
    };
    let Ok(_) = store.remove_employee(1).await else {
        panic!("second remove failed");
    };
    let Ok(gone) = store.get_employee(1).await else {
        panic!("get failed");
    };
    assert!(gone.is_none());

    store.close().await;
}
