//! Daily numbering and kitchen updates under concurrent checkouts on a
//! file-backed database (WAL, several pool connections)

use std::collections::HashSet;

use order_server::db::repository::order_summary::{self, SummaryFilter};
use order_server::db::repository::{category, product};
use order_server::orders;
use order_server::{Config, ServerState};
use shared::models::{
    CategoryCreate, DeliveryMode, OrderCreate, OrderItemRequest, OrderStatus, OrderUpdate,
    PaymentMethod, ProductCreate,
};

const ORDER_COUNT: usize = 40;
const TODAY: &str = "2025-03-14";
const NOW: i64 = 1_741_964_700_000;

fn checkout(product_id: i64, idx: usize) -> OrderCreate {
    OrderCreate {
        customer_name: format!("Cliente {idx}"),
        customer_contact: format!("7199999{idx:04}"),
        items: vec![OrderItemRequest {
            product_id,
            quantity: 1,
            notes: None,
            garnishes: vec![],
            item_number: 1,
        }],
        payment_method: PaymentMethod::Pix,
        delivery: DeliveryMode::Pickup,
        address: None,
        status: None,
    }
}

async fn setup() -> (tempfile::TempDir, ServerState, i64) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::for_tests();
    config.work_dir = dir.path().to_string_lossy().into_owned();
    config.database_path = dir.path().join("orders.db").to_string_lossy().into_owned();
    let state = ServerState::initialize(&config).await.unwrap();

    let cat = category::create(
        &state.pool,
        CategoryCreate {
            name: "Marmitas".into(),
            description: None,
            image: None,
            display_price: None,
            is_active: None,
        },
    )
    .await
    .unwrap();
    let feijoada = product::create(
        &state.pool,
        ProductCreate {
            category_id: cat.id,
            name: "Feijoada".into(),
            price: 25.0,
            image: None,
            description: None,
            garnishes: vec![],
            is_active: None,
        },
    )
    .await
    .unwrap();
    (dir, state, feijoada.id)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_orders_get_distinct_numbers() {
    let (_dir, state, product_id) = setup().await;

    let mut tasks = Vec::new();
    for idx in 0..ORDER_COUNT {
        let pool = state.pool.clone();
        tasks.push(tokio::spawn(async move {
            orders::create_order(&pool, TODAY, NOW, checkout(product_id, idx)).await
        }));
    }

    let mut numbers = HashSet::new();
    for task in tasks {
        let order = task.await.unwrap().unwrap();
        assert!(numbers.insert(order.order_number), "duplicate number {}", order.order_number);
    }
    let expected: HashSet<i64> = (1..=ORDER_COUNT as i64).collect();
    assert_eq!(numbers, expected);

    // Next day starts over
    let next_day =
        orders::create_order(&state.pool, "2025-03-15", 1_742_051_100_000, checkout(product_id, 0))
            .await
            .unwrap();
    assert_eq!(next_day.order_number, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_kitchen_updates_alongside_checkouts() {
    let (_dir, state, product_id) = setup().await;

    let mut placed = Vec::new();
    for idx in 0..20 {
        let order = orders::create_order(&state.pool, TODAY, NOW, checkout(product_id, idx))
            .await
            .unwrap();
        placed.push(order.order_number);
    }

    let mut updates = Vec::new();
    let mut checkouts = Vec::new();
    for (idx, order_number) in placed.iter().copied().enumerate() {
        let pool = state.pool.clone();
        updates.push(tokio::spawn(async move {
            let ready = OrderUpdate {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            };
            orders::update_order(&pool, TODAY, order_number, NOW + 1, ready).await
        }));
        let pool = state.pool.clone();
        checkouts.push(tokio::spawn(async move {
            orders::create_order(&pool, TODAY, NOW + 2, checkout(product_id, 100 + idx)).await
        }));
    }

    for task in updates {
        let order = task.await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
    }
    for task in checkouts {
        task.await.unwrap().unwrap();
    }

    let summaries = order_summary::list(&state.pool, &SummaryFilter::All)
        .await
        .unwrap();
    assert_eq!(summaries.len(), placed.len());
    assert_eq!(orders::list_orders(&state.pool, TODAY).await.unwrap().len(), 40);
}
