//! Shared accounts and requesters for integration tests.
//!
//! ```text
//! host (1, USD, self-hosted)
//!  └── collective (2)
//!       └── event (3)
//! payee profile (40) ← author user 4
//! ```

#![allow(dead_code)]

use hostkit_runtime::model::{Collective, CollectiveKind, Expense, ExpenseKind, ExpenseStatus};
use hostkit_runtime::Requester;
use hostkit_types::{Amount, CollectiveId, Currency, ExpenseId, Role, UserId};

pub const HOST: CollectiveId = CollectiveId(1);
pub const COLLECTIVE: CollectiveId = CollectiveId(2);
pub const EVENT: CollectiveId = CollectiveId(3);
pub const PAYEE: CollectiveId = CollectiveId(40);
pub const AUTHOR: UserId = UserId(4);

pub fn host() -> Collective {
    Collective::new(HOST, CollectiveKind::Organization, Currency::Usd)
        .with_name("Fiscal Host")
        .with_host(HOST)
        .with_admin_count(2)
}

pub fn collective() -> Collective {
    Collective::new(COLLECTIVE, CollectiveKind::Collective, Currency::Usd)
        .with_name("Open Garden")
        .with_host(HOST)
        .with_admin_count(2)
}

pub fn event() -> Collective {
    Collective::new(EVENT, CollectiveKind::Event, Currency::Usd)
        .with_host(HOST)
        .with_parent(COLLECTIVE)
}

pub fn expense(status: ExpenseStatus) -> Expense {
    Expense::new(
        ExpenseId(10),
        COLLECTIVE,
        PAYEE,
        AUTHOR,
        Amount::new(10_000, Currency::Usd),
    )
    .with_status(status)
}

pub fn charge(status: ExpenseStatus) -> Expense {
    expense(status).with_kind(ExpenseKind::Charge)
}

pub fn public() -> Requester {
    Requester::anonymous()
}

pub fn random_user() -> Requester {
    Requester::user(UserId(100), CollectiveId(1000))
}

pub fn author() -> Requester {
    Requester::user(AUTHOR, PAYEE)
}

pub fn collective_admin() -> Requester {
    Requester::user(UserId(5), CollectiveId(50)).with_role(COLLECTIVE, Role::Admin)
}

pub fn host_admin() -> Requester {
    Requester::user(UserId(6), CollectiveId(60)).with_role(HOST, Role::Admin)
}

pub fn collective_accountant() -> Requester {
    Requester::user(UserId(7), CollectiveId(70)).with_role(COLLECTIVE, Role::Accountant)
}

pub fn host_accountant() -> Requester {
    Requester::user(UserId(8), CollectiveId(80)).with_role(HOST, Role::Accountant)
}

pub fn root() -> Requester {
    Requester::user(UserId(9), CollectiveId(90)).as_root()
}
