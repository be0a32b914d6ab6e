use proxy_sieve::{validate_file, CheckerConfig, Config, RunSummary};
use std::fs;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const OK_TARGET: &str = "http://reach.test/ok";
const SLOW_TARGET: &str = "http://reach.test/slow";

/// How a fake proxy treats a request
#[derive(Clone, Copy)]
enum Behaviour {
    AnswerAll,
    /// Answer requests for `/ok`, hold every other one open
    AnswerOkOnly,
    NeverAnswer,
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Start an HTTP proxy on a random local port
async fn fake_proxy(behaviour: Behaviour) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let head = read_head(&mut socket).await;
                let answer = match behaviour {
                    Behaviour::AnswerAll => true,
                    Behaviour::AnswerOkOnly => head.contains("/ok "),
                    Behaviour::NeverAnswer => false,
                };
                if answer {
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                        )
                        .await;
                } else {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
            });
        }
    });

    port
}

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

fn checker() -> CheckerConfig {
    CheckerConfig::new()
        .with_timeout(Duration::from_millis(500))
        .with_targets(vec![OK_TARGET.to_string(), SLOW_TARGET.to_string()])
}

fn sorted_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    lines.sort();
    lines
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_good_proxies_are_saved_and_bad_lines_skipped() {
    let always = fake_proxy(Behaviour::AnswerAll).await;
    let partial = fake_proxy(Behaviour::AnswerOkOnly).await;

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: dir.path().join("proxy.txt"),
        output: dir.path().join("good_proxy.txt"),
    };
    let always_line = format!("127.0.0.1:{always}");
    let partial_line = format!("127.0.0.1:{partial}:user:pass");
    fs::write(
        &config.input,
        format!("{always_line}\nbad-line\n{partial_line}\n"),
    )
    .unwrap();

    let summary = validate_file(&config, &checker()).await.unwrap();

    assert_eq!(
        summary,
        RunSummary {
            proxies: 2,
            malformed_lines: 1,
            probes: 4,
            successes: 3,
            timeouts: 1,
            failures: 0,
            good_proxies: 2,
            persisted: 2,
        }
    );
    let content = fs::read_to_string(&config.output).unwrap();
    let mut expected = vec![always_line, partial_line];
    expected.sort();
    assert_eq!(sorted_lines(&content), expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_all_failures_produce_empty_file() {
    let refused_a = closed_port().await;
    let refused_b = closed_port().await;

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: dir.path().join("proxy.txt"),
        output: dir.path().join("good_proxy.txt"),
    };
    fs::write(
        &config.input,
        format!("127.0.0.1:{refused_a}\n127.0.0.1:{refused_b}:u:p\n"),
    )
    .unwrap();
    fs::write(&config.output, "left over from last run\n").unwrap();

    let summary = validate_file(&config, &checker()).await.unwrap();

    assert_eq!(summary.probes, 4);
    assert_eq!(summary.successes, 0);
    assert_eq!(summary.good_proxies, 0);
    assert_eq!(summary.persisted, 0);
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_proxy_timing_out_everywhere_is_not_saved() {
    let silent = fake_proxy(Behaviour::NeverAnswer).await;
    let always = fake_proxy(Behaviour::AnswerAll).await;

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: dir.path().join("proxy.txt"),
        output: dir.path().join("good_proxy.txt"),
    };
    fs::write(
        &config.input,
        format!("127.0.0.1:{silent}\n127.0.0.1:{always}\n"),
    )
    .unwrap();

    let summary = validate_file(&config, &checker()).await.unwrap();

    assert_eq!(summary.timeouts, 2);
    assert_eq!(summary.failures, 0);
    assert_eq!(summary.persisted, summary.good_proxies);
    assert_eq!(
        sorted_lines(&fs::read_to_string(&config.output).unwrap()),
        vec![format!("127.0.0.1:{always}")]
    );
}

#[tokio::test]
async fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: dir.path().join("nope.txt"),
        output: dir.path().join("good_proxy.txt"),
    };

    assert!(validate_file(&config, &checker()).await.is_err());
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        input: dir.path().join("proxy.txt"),
        output: dir.path().join("missing").join("good_proxy.txt"),
    };
    fs::write(&config.input, "bad-line\n").unwrap();

    let err = validate_file(&config, &checker()).await.unwrap_err();
    assert!(err.to_string().contains("Error creating"));
}
