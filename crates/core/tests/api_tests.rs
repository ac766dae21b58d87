//! Library API integration tests
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use vitis_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

/// Serves one canned HTTP response and reports the request line it received.
async fn serve_once(status: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let request_line = String::from_utf8_lossy(&request).lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    (format!("http://{}/index.php", addr), rx)
}

fn client_for(base_url: String) -> Vitis {
    Vitis::new(VitisConfig { base_url, fetch: FetchConfig { timeout: 5, ..Default::default() }, ..Default::default() })
        .unwrap()
}

#[test]
fn test_extract_production_page() {
    let html = read_fixture("producao.html");
    let url = build_url("production", Some("2023"), None).unwrap();
    let result = extract(&html, url.as_str());

    assert_eq!(result.title, "Produção de vinhos, sucos e derivados [2023]");
    assert_eq!(result.headers, vec!["Produto", "Quantidade (L.)"]);
    assert_eq!(result.rows.len(), 5);
    assert_eq!(result.rows[0].get("Produto"), Some("VINHO DE MESA"));
    assert_eq!(result.rows[1].get("Produto"), Some("Tinto"));
    assert_eq!(result.rows[4].get("Quantidade (L.)"), Some("457.792.870"));
    assert_eq!(result.source_url, url.as_str());
    assert!(result.message.is_none());
}

#[test]
fn test_extract_page_without_table() {
    let html = read_fixture("sem_tabela.html");
    let result = extract(&html, "http://example.com/a");

    assert_eq!(result.title, "data not found");
    assert!(result.headers.is_empty());
    assert!(result.rows.is_empty());
    assert_eq!(result.message.as_deref(), Some("table not found"));
    assert_eq!(result.source_url, "http://example.com/a");
}

#[test]
fn test_extract_headerless_table() {
    let html = read_fixture("sem_cabecalho.html");
    let result = extract(&html, "http://example.com/b");

    assert_eq!(result.headers, vec!["Column 1", "Column 2", "Column 3"]);
    assert_eq!(result.rows.len(), 3);
    assert_eq!(result.rows[0].get("Column 1"), Some("Alemanha"));
    assert_eq!(result.rows[1].len(), 3);
    assert_eq!(result.rows[2].len(), 1);
    assert!(!result.rows[2].contains("Column 2"));
}

#[test]
fn test_source_url_round_trip() {
    for html in ["", "<html></html>", "<table><tr><td>x</td></tr></table>", "<<<not html"] {
        assert_eq!(extract(html, "http://example.com/?q=1").source_url, "http://example.com/?q=1");
    }
}

#[test]
fn test_json_output_shape() {
    let html = read_fixture("producao.html");
    let json = extract(&html, "http://example.com").to_json().unwrap();

    assert!(json.get("title").is_some());
    assert!(json.get("headers").is_some());
    assert!(json["data"].is_array());
    assert_eq!(json["source_url"], "http://example.com");
    assert!(json.get("message").is_none());
    assert!(json.get("error").is_none());
}

#[test]
fn test_catalog_api() {
    let catalog = catalog();
    assert_eq!(
        catalog.categories,
        vec!["production", "processing", "commercialization", "import", "export"]
    );
    assert!(catalog.subcategories["import"].contains(&"uvas_passas"));
}

#[test]
fn test_localized_extractor() {
    let config = ExtractConfig::builder()
        .fallback_title("Dados não encontrados")
        .missing_table_message("Tabela não encontrada")
        .column_prefix("Coluna")
        .build();
    let extractor = TableExtractor::new(config).unwrap();

    let missing = extractor.extract(&read_fixture("sem_tabela.html"), "u");
    assert_eq!(missing.title, "Dados não encontrados");
    assert_eq!(missing.message.as_deref(), Some("Tabela não encontrada"));

    let headerless = extractor.extract(&read_fixture("sem_cabecalho.html"), "u");
    assert_eq!(headerless.headers[0], "Coluna 1");
}

#[tokio::test]
async fn test_fetch_and_extract_end_to_end() {
    let (base_url, request_line) = serve_once("200 OK", read_fixture("producao.html")).await;
    let vitis = client_for(base_url);

    let outcome = vitis.fetch_and_extract("processing", Some("2023"), Some("viniferas")).await;
    let request_line = request_line.await.unwrap();

    assert!(request_line.starts_with("GET /index.php?"));
    assert!(request_line.contains("opcao=opt_03"));
    assert!(request_line.contains("ano=2023"));
    assert!(request_line.contains("subopcao=10"));

    match outcome {
        Outcome::Extracted(result) => {
            assert_eq!(result.headers.len(), 2);
            assert!(result.source_url.contains("subopcao=10"));
        }
        Outcome::Failed(kind, payload) => panic!("unexpected {:?}: {}", kind, payload.error),
    }
}

#[tokio::test]
async fn test_fetch_failure_on_error_status() {
    let (base_url, _request_line) = serve_once("500 Internal Server Error", "oops".to_string()).await;
    let vitis = client_for(base_url);

    let outcome = vitis.fetch_and_extract("export", None, None).await;
    match outcome {
        Outcome::Failed(FailureKind::Fetch, payload) => {
            assert!(payload.error.starts_with("failed to reach data source: "));
            assert!(payload.error.contains("500"));
        }
        other => panic!("expected fetch failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_failure_when_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let vitis = client_for(format!("http://{}/index.php", addr));
    let err = vitis.try_fetch_and_extract("import", None, None).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Fetch);
}

#[tokio::test]
async fn test_invalid_category_payload() {
    let json = fetch_and_extract("vinho", Some("2023"), None).await.to_json().unwrap();
    assert_eq!(json, serde_json::json!({ "error": "invalid category" }));
}
