//! Concurrent reads against a populated table.

use axum::http::Method;
use std::thread;

use service_mux::routing::{Handler, Mux};

#[test]
fn test_concurrent_lookups_are_consistent() {
    let mux = Mux::default();
    for i in 0..50 {
        let handler = Handler::from_fn(|_req| async { "ok" });
        mux.route(&format!("GET /items/{}", i), handler.clone()).unwrap();
        mux.route(&format!("POST host{}.example.com/items/{}", i, i), handler)
            .unwrap();
    }
    let table = mux.table();

    thread::scope(|scope| {
        for worker in 0..100 {
            scope.spawn(move || {
                for round in 0..200 {
                    let i = (worker + round) % 60;
                    let path = format!("/items/{}", i);
                    let host = format!("host{}.example.com", i);

                    let hostless = table.lookup(&Method::GET, "", &path);
                    let hosted = table.lookup(&Method::POST, &host, &path);

                    if i < 50 {
                        assert_eq!(hostless.unwrap().pattern(), format!("GET {}", path));
                        assert_eq!(
                            hosted.unwrap().pattern(),
                            format!("POST {}{}", host, path)
                        );
                    } else {
                        assert!(hostless.is_none());
                        assert!(hosted.is_none());
                    }
                    assert!(table.lookup(&Method::DELETE, "", &path).is_none());
                }
            });
        }
    });

    assert_eq!(table.len(), 100);
}
