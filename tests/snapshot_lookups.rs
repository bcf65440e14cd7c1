mod common;

use budget_planner::config::Config;
use budget_planner::domain::{Account, Budget, Bucket, Category, Frequency};
use budget_planner::planner::services::{BudgetService, OccurrenceService};
use budget_planner::storage::{LedgerData, MemoryStore};
use budget_planner::ErrorKind;
use uuid::Uuid;

use common::{clock, date};

const SEEDED_LEDGER: &str = r#"{
  "budgets": [
    {
      "id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e01",
      "description": "Holiday fund",
      "amount": -150.0,
      "frequency": { "monthly": { "day_of_month": 31 } },
      "due_date": "2026-08-31",
      "is_goal": true,
      "category_id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e02",
      "account_id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e04"
    }
  ],
  "categories": [
    {
      "id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e02",
      "name": "Savings",
      "bucket_id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e03"
    }
  ],
  "buckets": [
    { "id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e03", "name": "Future" }
  ],
  "accounts": [
    { "id": "5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e04", "name": "Savings account" }
  ]
}"#;

fn id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).expect("uuid")
}

#[tokio::test]
async fn json_seeded_ledger_resolves_names() {
    let store = MemoryStore::from_json(SEEDED_LEDGER).expect("seed");
    let snapshot = OccurrenceService::load(&store).await.expect("snapshot");
    let budget = snapshot
        .budget(id("5f1d8a4e-0d7c-4d43-9a43-1b2f3c4d5e01"))
        .expect("budget");

    assert!(budget.is_active);
    assert!(budget.is_goal);
    assert_eq!(snapshot.category_name(budget.category_id), Some("Savings"));
    assert_eq!(
        budget.account_id.and_then(|account| snapshot.account_name(account)),
        Some("Savings account")
    );
    assert_eq!(
        snapshot
            .bucket_for_category(budget.category_id)
            .map(|bucket| bucket.name.as_str()),
        Some("Future")
    );
    assert_eq!(snapshot.recipient_name(Uuid::new_v4()), None);

    // Day 31 clamps in shorter months and returns in longer ones.
    let dates: Vec<_> = OccurrenceService::for_budget(&snapshot, budget.id, &clock(), &Config::default())
        .expect("occurrences")
        .into_iter()
        .take(7)
        .map(|occurrence| occurrence.due_date)
        .collect();
    assert_eq!(
        dates,
        vec![
            date(2026, 8, 31),
            date(2026, 9, 30),
            date(2026, 10, 31),
            date(2026, 11, 30),
            date(2026, 12, 31),
            date(2027, 1, 31),
            date(2027, 2, 28),
        ]
    );

    let err = snapshot.transaction(Uuid::new_v4()).expect_err("no transactions");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn exported_ledger_reloads_into_the_same_snapshot() {
    let bucket = Bucket::new("Essentials");
    let category = Category {
        bucket_id: Some(bucket.id),
        ..Category::new("Utilities")
    };
    let account = Account::new("Checking");
    let power = Budget::new("Power", -90.0, Frequency::every_days(30), date(2026, 10, 2), category.id)
        .with_account(account.id)
        .with_transaction_cost(-1.0)
        .goal();
    let store = MemoryStore::new(LedgerData {
        budgets: vec![power.clone()],
        categories: vec![category],
        buckets: vec![bucket],
        accounts: vec![account],
        ..LedgerData::default()
    });

    let json = store.to_json().await.expect("export");
    let reloaded = MemoryStore::from_json(&json).expect("import");
    let before = OccurrenceService::load(&store).await.expect("snapshot");
    let after = OccurrenceService::load(&reloaded).await.expect("snapshot");

    assert_eq!(after.budgets, before.budgets);
    assert_eq!(after.buckets, before.buckets);
    assert_eq!(after.budget(power.id).expect("budget").target(), -91.0);
    assert_eq!(
        after
            .bucket_for_category(power.category_id)
            .map(|bucket| bucket.name.as_str()),
        Some("Essentials")
    );
}

#[test]
fn budget_validation_rejects_unusable_rules() {
    let category = Uuid::new_v4();
    let anchor = date(2026, 1, 1);
    let bad = [
        Budget::new("  ", -10.0, Frequency::Weekly, anchor, category),
        Budget::new("Nothing", 0.0, Frequency::Weekly, anchor, category),
        Budget::new("Drift", -10.0, Frequency::Monthly { day_of_month: None }, anchor, category),
        Budget::new("Day 32", -10.0, Frequency::monthly_on(32), anchor, category),
        Budget::new("Stuck", -10.0, Frequency::every_days(0), anchor, category),
    ];
    for budget in &bad {
        let err = BudgetService::validate(budget).expect_err("rejected");
        assert_eq!(err.kind(), ErrorKind::Validation, "{}", budget.description);
    }
    assert!(BudgetService::validate(&Budget::new("Rent", -900.0, Frequency::monthly_on(31), anchor, category)).is_ok());
}
