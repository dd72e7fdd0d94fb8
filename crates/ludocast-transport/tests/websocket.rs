//! Integration tests for the WebSocket transport.
//!
//! Each test binds to port 0, asks the listener for the assigned port,
//! and drives a real `tokio-tungstenite` client against it.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use ludocast_transport::{Connection, Transport, WebSocketConnection, WebSocketTransport};
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds a transport, connects one client, and returns both ends.
    async fn connected_pair() -> (WebSocketConnection, ClientWs) {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("should have local addr");

        let server_handle =
            tokio::spawn(async move { transport.accept().await.expect("should accept") });

        let (client_ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("client should connect");
        let server_conn = server_handle.await.expect("task should complete");
        (server_conn, client_ws)
    }

    #[tokio::test]
    async fn test_server_sends_text_frames() {
        let (server_conn, mut client_ws) = connected_pair().await;
        assert!(server_conn.id().into_inner() > 0);

        server_conn
            .send(r#"{"event":"restart"}"#)
            .await
            .expect("send should succeed");

        let msg = client_ws.next().await.unwrap().unwrap();
        assert!(msg.is_text(), "lobby frames go out as text");
        assert_eq!(msg.into_text().unwrap().as_str(), r#"{"event":"restart"}"#);
    }

    #[tokio::test]
    async fn test_server_receives_text_and_binary_frames() {
        let (server_conn, mut client_ws) = connected_pair().await;

        client_ws
            .send(Message::text(r#"{"event":"chat","data":"hi"}"#.to_owned()))
            .await
            .unwrap();
        client_ws
            .send(Message::Binary(b"raw".to_vec().into()))
            .await
            .unwrap();

        let first = server_conn.recv().await.unwrap().expect("text frame");
        assert_eq!(first, br#"{"event":"chat","data":"hi"}"#);
        let second = server_conn.recv().await.unwrap().expect("binary frame");
        assert_eq!(second, b"raw");
    }

    #[tokio::test]
    async fn test_send_is_not_blocked_by_pending_recv() {
        let (server_conn, mut client_ws) = connected_pair().await;
        let server_conn = std::sync::Arc::new(server_conn);

        // Park a reader on the connection, then send through it.
        let reader = {
            let conn = std::sync::Arc::clone(&server_conn);
            tokio::spawn(async move { conn.recv().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        tokio::time::timeout(
            std::time::Duration::from_secs(2),
            server_conn.send(r#"{"event":"diceRoll","data":6}"#),
        )
        .await
        .expect("send must not wait for the reader")
        .expect("send should succeed");

        let msg = client_ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_text().unwrap().as_str(), r#"{"event":"diceRoll","data":6}"#);

        client_ws.send(Message::Close(None)).await.unwrap();
        let received = reader.await.unwrap().expect("recv should not error");
        assert!(received.is_none());
    }

    #[tokio::test]
    async fn test_recv_returns_none_on_client_close() {
        let (server_conn, mut client_ws) = connected_pair().await;

        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_connections_get_distinct_ids() {
        let (a, _client_a) = connected_pair().await;
        let (b, _client_b) = connected_pair().await;
        assert_ne!(a.id(), b.id());
    }
}
