//! `RedisHitCounter` against an in-process RESP stub.
//!
//! The stub speaks just enough RESP2 for the client: `INCR`, `PING`, and
//! `+OK` for anything else (connection setup). Increments are serialized by a
//! mutex, like the single-threaded store they stand in for.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::join_all;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use loancalc_gateway::counter::{HitCounter, RedisHitCounter};

const KEY: &str = "loancalc:hits";

#[derive(Default)]
struct StubStore {
    values: Mutex<HashMap<String, String>>,
    loading: AtomicBool,
    connections: AtomicUsize,
}

impl StubStore {
    fn reply(&self, args: &[String]) -> String {
        let Some(cmd) = args.first() else {
            return "-ERR empty command\r\n".into();
        };
        match cmd.to_ascii_uppercase().as_str() {
            "PING" => "+PONG\r\n".into(),
            "INCR" => {
                if self.loading.load(Ordering::SeqCst) {
                    return "-LOADING stub is loading the dataset in memory\r\n".into();
                }
                let Some(key) = args.get(1) else {
                    return "-ERR wrong number of arguments for 'incr' command\r\n".into();
                };
                let mut values = self.values.lock().unwrap();
                let current = values.get(key).cloned().unwrap_or_else(|| "0".into());
                match current.parse::<i64>() {
                    Ok(v) => {
                        values.insert(key.clone(), (v + 1).to_string());
                        format!(":{}\r\n", v + 1)
                    }
                    Err(_) => "-ERR value is not an integer or out of range\r\n".into(),
                }
            }
            _ => "+OK\r\n".into(),
        }
    }
}

async fn read_command<R: AsyncBufReadExt + Unpin>(r: &mut R) -> Option<Vec<String>> {
    let mut line = String::new();
    if r.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let n: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(n);
    for _ in 0..n {
        line.clear();
        r.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0u8; len + 2];
        r.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        args.push(String::from_utf8(buf).ok()?);
    }
    Some(args)
}

async fn serve_conn(sock: TcpStream, store: Arc<StubStore>) {
    let (r, mut w) = sock.into_split();
    let mut r = BufReader::new(r);
    while let Some(args) = read_command(&mut r).await {
        if w.write_all(store.reply(&args).as_bytes()).await.is_err() {
            return;
        }
    }
}

async fn spawn_stub(store: Arc<StubStore>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((sock, _)) = listener.accept().await {
            store.connections.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(serve_conn(sock, Arc::clone(&store)));
        }
    });
    addr
}

fn client(addr: SocketAddr, timeout_ms: u64) -> RedisHitCounter {
    RedisHitCounter::new(
        &format!("redis://{addr}/"),
        KEY.to_string(),
        Duration::from_millis(timeout_ms),
    )
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn separate_clients_never_share_a_count() {
    let store = Arc::new(StubStore::default());
    let addr = spawn_stub(Arc::clone(&store)).await;

    // One client per simulated instance, each with its own connection.
    let clients: Vec<Arc<RedisHitCounter>> = (0..8).map(|_| Arc::new(client(addr, 2000))).collect();

    let calls = clients.iter().flat_map(|c| {
        (0..25).map(move |_| {
            let c = Arc::clone(c);
            async move { c.get_and_increment().await.unwrap() }
        })
    });

    let got: HashSet<i64> = join_all(calls).await.into_iter().collect();
    assert_eq!(got.len(), 200);
    assert_eq!(got, (1..=200).collect::<HashSet<i64>>());
    assert!(store.connections.load(Ordering::SeqCst) >= 8);
}

#[tokio::test]
async fn counts_progress_across_instances() {
    let store = Arc::new(StubStore::default());
    let addr = spawn_stub(store).await;
    let a = client(addr, 2000);
    let b = client(addr, 2000);

    let mut last = 0;
    for i in 0..20 {
        let c = if i % 2 == 0 { &a } else { &b };
        let n = c.get_and_increment().await.unwrap();
        assert!(n > last, "{n} after {last}");
        last = n;
    }
    assert_eq!(last, 20);
}

#[tokio::test]
async fn failed_increment_leaves_count_untouched() {
    let store = Arc::new(StubStore::default());
    let addr = spawn_stub(Arc::clone(&store)).await;
    let c = client(addr, 2000);

    let before = c.get_and_increment().await.unwrap();

    store.loading.store(true, Ordering::SeqCst);
    let err = c.get_and_increment().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");
    store.loading.store(false, Ordering::SeqCst);

    let after = c.get_and_increment().await.unwrap();
    assert_eq!(after, before + 1);
}

#[tokio::test]
async fn corrupted_key_is_protocol_error() {
    let store = Arc::new(StubStore::default());
    store.values.lock().unwrap().insert(KEY.into(), "not-a-number".into());
    let addr = spawn_stub(store).await;

    let err = client(addr, 2000).get_and_increment().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "PROTOCOL_ERROR");
}

#[tokio::test]
async fn negative_key_is_protocol_error() {
    let store = Arc::new(StubStore::default());
    store.values.lock().unwrap().insert(KEY.into(), "-10".into());
    let addr = spawn_stub(store).await;

    let err = client(addr, 2000).get_and_increment().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "PROTOCOL_ERROR");
}

#[tokio::test]
async fn refused_connection_is_store_unavailable() {
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };

    // Generous timeout: a refusal must come back as a refusal, not a timeout.
    let c = client(addr, 5000);
    let started = std::time::Instant::now();
    let err = c.get_and_increment().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");
    assert!(!err.to_string().contains("timed out"), "{err}");
    assert!(started.elapsed() < Duration::from_secs(2), "{:?}", started.elapsed());

    let err = c.ping().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn silent_store_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((sock, _)) = listener.accept().await {
            held.push(sock);
        }
    });

    let err = client(addr, 150).get_and_increment().await.unwrap_err();
    assert_eq!(err.client_code().as_str(), "STORE_UNAVAILABLE");
    assert!(err.to_string().contains("timed out"), "{err}");
}

#[tokio::test]
async fn ping_reaches_store() {
    let store = Arc::new(StubStore::default());
    let addr = spawn_stub(store).await;
    client(addr, 1000).ping().await.unwrap();
}
