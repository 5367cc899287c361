//! Receipt printing through the HTTP route, against a local TCP listener
//! standing in for the thermal printer

mod common;

use common::*;
use http::{Method, StatusCode};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

use order_server::Config;
use shared::ErrorCode;

async fn app_with_printer(addr: String) -> TestApp {
    let mut config = Config::for_tests();
    config.printer.addr = addr;
    TestApp::with_config(config).await
}

async fn place_order(t: &TestApp) {
    let ids = t.seed_menu(&[("Feijoada", 10.0)]).await;
    let created = t
        .send(
            Method::POST,
            "/pedidos",
            None,
            Some(json!({
                "nome_cliente": "João",
                "numero_cliente": "71999990000",
                "items": [{"id_produto": ids[0], "quantidade": 2, "acompanhamentos": ["Farofa"]}],
                "metodo_pagamento": "dinheiro",
                "deliveryType": "entrega",
                "endereco": "Rua A, 10"
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
}

#[tokio::test]
async fn test_print_sends_receipt() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let t = app_with_printer(listener.local_addr().unwrap().to_string()).await;
    place_order(&t).await;

    let printer = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        received
    });

    let cook = t.login(COOK_CPF, COOK_PASSWORD).await;
    let response = t.send(Method::GET, "/imprimir/1", Some(&cook), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let received = printer.await.unwrap();
    // Windows-1252 bytes; the ASCII parts read back as-is
    let text = String::from_utf8_lossy(&received);
    assert!(text.contains("PEDIDO #1"));
    assert!(text.contains("Entrega - Rua A, 10"));
    assert!(text.contains("TOTAL: R$ 20.00"));
    assert!(received.windows(3).any(|w| w == b"Jo\xE3"));
}

#[tokio::test]
async fn test_print_with_printer_offline() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    drop(listener);

    let t = app_with_printer(addr).await;
    place_order(&t).await;

    let cook = t.login(COOK_CPF, COOK_PASSWORD).await;
    let response = t.send(Method::GET, "/imprimir/1", Some(&cook), None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["code"], ErrorCode::PrinterNotAvailable.code());
}
