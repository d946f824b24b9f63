use challengedns::error::Error;
use challengedns::DnsServer;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tokio::net::UdpSocket;
use trust_dns_client::client::{AsyncClient, ClientHandle};
use trust_dns_client::op::{DnsResponse, Message, ResponseCode};
use trust_dns_client::rr::{DNSClass, Name, RData, RecordType};
use trust_dns_client::udp::UdpClientStream;

const FQDN: &str = "_acme-challenge.domain.";
const TXT_VALUE: &str = "LHDhK3oGRvkiefQnx7OOczTY5Tic_xZ6HcMOc_gmtoM";

#[tokio::test]
async fn present_serves_record_and_cleanup_retracts_it() {
    let addr = reserve_local_addr().await;
    let server = DnsServer::new(&addr.to_string()).unwrap();
    assert!(!server.is_up());

    server.present(FQDN, TXT_VALUE).await.expect("present failed");
    assert!(server.is_up());

    let response = dns_query(FQDN, RecordType::TXT, addr).await;
    assert_eq!(response.header().response_code(), ResponseCode::NoError);
    assert!(response.header().authoritative());
    assert!(!response.header().recursion_available());
    assert_eq!(response.answers().len(), 1);
    match response.answers()[0].data() {
        Some(RData::TXT(txt)) => assert_eq!(txt.txt_data()[0].as_ref(), TXT_VALUE.as_bytes()),
        other => panic!("expected TXT answer, got {other:?}"),
    }

    let response = dns_query("bar.com.", RecordType::TXT, addr).await;
    assert_eq!(response.header().response_code(), ResponseCode::NXDomain);
    assert!(response.answers().is_empty());

    server.clean_up().await.expect("cleanup failed");
    assert!(!server.is_up());
    assert!(
        no_reply(addr).await,
        "expected queries after cleanup to go unanswered"
    );
}

#[tokio::test]
async fn matching_name_with_wrong_type_is_nxdomain() {
    let addr = reserve_local_addr().await;
    let server = DnsServer::new(&addr.to_string()).unwrap();
    server.present(FQDN, TXT_VALUE).await.unwrap();

    let response = dns_query(FQDN, RecordType::A, addr).await;
    assert_eq!(response.header().response_code(), ResponseCode::NXDomain);
    assert!(response.answers().is_empty());

    server.clean_up().await.unwrap();
}

#[tokio::test]
async fn present_replaces_the_previous_record() {
    let addr = reserve_local_addr().await;
    let server = DnsServer::new(&addr.to_string()).unwrap();

    server.present(FQDN, "first-token").await.unwrap();
    server
        .present("_acme-challenge.other.", "second-token")
        .await
        .unwrap();
    assert!(server.is_up());

    // The superseded name is gone entirely, not merely shadowed.
    let response = dns_query(FQDN, RecordType::TXT, addr).await;
    assert_eq!(response.header().response_code(), ResponseCode::NXDomain);

    let response = dns_query("_acme-challenge.other.", RecordType::TXT, addr).await;
    assert_eq!(response.header().response_code(), ResponseCode::NoError);
    match response.answers()[0].data() {
        Some(RData::TXT(txt)) => assert_eq!(txt.txt_data()[0].as_ref(), b"second-token"),
        other => panic!("expected TXT answer, got {other:?}"),
    }

    server.clean_up().await.unwrap();
}

#[tokio::test]
async fn cleanup_without_present_reports_not_running() {
    let addr = reserve_local_addr().await;
    let server = DnsServer::new(&addr.to_string()).unwrap();

    let err = server.clean_up().await.expect_err("cleanup should fail");
    assert!(matches!(err, Error::NotRunning));
    assert!(!server.is_up());
}

#[tokio::test]
async fn bind_failure_leaves_the_manager_inactive() {
    let blocker = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = blocker.local_addr().unwrap();
    let server = DnsServer::new(&addr.to_string()).unwrap();

    let err = server
        .present(FQDN, TXT_VALUE)
        .await
        .expect_err("bind should fail while the port is taken");
    assert!(matches!(err, Error::Bind { .. }));
    assert!(!server.is_up());
}

#[tokio::test]
async fn zero_question_request_gets_no_reply() {
    let addr = reserve_local_addr().await;
    let server = DnsServer::new(&addr.to_string()).unwrap();
    server.present(FQDN, TXT_VALUE).await.unwrap();

    assert!(
        no_reply(addr).await,
        "expected the zero-question datagram to be dropped"
    );

    // The serve loop keeps answering well-formed queries afterwards.
    let response = dns_query(FQDN, RecordType::TXT, addr).await;
    assert_eq!(response.header().response_code(), ResponseCode::NoError);

    server.clean_up().await.unwrap();
}

#[test]
fn invalid_listen_address_is_rejected() {
    assert!(matches!(
        DnsServer::new("not-an-address"),
        Err(Error::InvalidAddress { .. })
    ));
    assert!(matches!(
        DnsServer::new("127.0.0.1"),
        Err(Error::InvalidAddress { .. })
    ));
}

/// Grab a free localhost port by binding port 0 and letting the socket drop.
async fn reserve_local_addr() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.local_addr().unwrap()
}

async fn dns_query(fqdn: &str, record_type: RecordType, server_addr: SocketAddr) -> DnsResponse {
    let stream = UdpClientStream::<UdpSocket>::new(server_addr);
    let (mut client, bg) = AsyncClient::connect(stream)
        .await
        .expect("client connect failed");
    tokio::spawn(bg);
    client
        .query(Name::from_str(fqdn).unwrap(), DNSClass::IN, record_type)
        .await
        .expect("query failed")
}

/// Send a question-less DNS request and report whether it went unanswered.
async fn no_reply(server_addr: SocketAddr) -> bool {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let mut empty = Message::new();
    empty.set_id(1234);
    socket
        .send_to(&empty.to_vec().unwrap(), server_addr)
        .await
        .unwrap();

    let mut buf = [0u8; 512];
    tokio::time::timeout(Duration::from_millis(500), socket.recv_from(&mut buf))
        .await
        .is_err()
}
