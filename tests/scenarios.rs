// ABOUTME: End-to-end scenarios against an in-memory duplex transport with a scripted mock SMSC
// ABOUTME: Each test name matches the literal scenario it exercises from the design's property list

use bytes::Bytes;
use smpp_client::codec::PduHeader;
use smpp_client::frame::{read_frame, write_frame};
use smpp_client::pdu::{
    Address, BindResponse, CommandId, CommandStatus, DataCoding, DeliverSm, NumericPlanIndicator,
    QuerySmResponse, SubmitSmResponse, Tlv, TypeOfNumber,
};
use smpp_client::{
    Client, ClientConfig, ClientConfigBuilder, CsmsMethod, Frame, ParsedMessage, SendSmsOptions, SmppError,
};
use std::time::Duration;
use tokio::io::{duplex, DuplexStream};

fn test_config() -> ClientConfig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    ClientConfigBuilder::new()
        .read_timeout(Duration::from_millis(500))
        .connect_timeout(Duration::from_millis(500))
        .build()
}

fn intl(value: &str) -> Address {
    Address::new(value, TypeOfNumber::International, NumericPlanIndicator::Isdn).unwrap()
}

async fn bound_transmitter() -> (Client<DuplexStream>, DuplexStream) {
    let (client_side, smsc_side) = duplex(8192);
    let mut client = Client::from_transport(client_side, test_config());
    let mut smsc = smsc_side;

    let bind_task = tokio::spawn(async move {
        client.bind_transmitter("system_id", "password").await.unwrap();
        client
    });

    let bind_req = read_frame(&mut smsc).await.unwrap().unwrap();
    let resp = Frame::BindTransmitterResp(
        PduHeader::for_command(
            CommandId::BindTransmitterResp,
            CommandStatus::OK,
            bind_req.sequence_number(),
        ),
        BindResponse {
            system_id: "smsc-sim".to_string(),
        },
    );
    write_frame(&mut smsc, &resp).await.unwrap();

    let client = bind_task.await.unwrap();
    (client, smsc)
}

#[tokio::test]
async fn s3_single_gsm_submit_returns_message_id() {
    let (mut client, mut smsc) = bound_transmitter().await;

    let submit_task = tokio::spawn(async move {
        let id = client
            .send_sms(&intl("1234"), &intl("5678"), "Hello World", DataCoding::Default, 0, SendSmsOptions::default())
            .await
            .unwrap();
        (client, id)
    });

    let submit_req = read_frame(&mut smsc).await.unwrap().unwrap();
    assert!(matches!(submit_req, Frame::SubmitSm(_, _)));
    let resp = Frame::SubmitSmResp(
        PduHeader::for_command(CommandId::SubmitSmResp, CommandStatus::OK, submit_req.sequence_number()),
        SubmitSmResponse {
            message_id: "msg123".to_string(),
        },
    );
    write_frame(&mut smsc, &resp).await.unwrap();

    let (_client, id) = submit_task.await.unwrap();
    assert_eq!(id, "msg123");
}

#[tokio::test]
async fn s4_long_gsm_split_sar_returns_first_segment_id() {
    let (mut client, mut smsc) = bound_transmitter().await;
    let message: String = "A".repeat(200);

    let submit_task = tokio::spawn(async move {
        let id = client
            .send_sms(&intl("1234"), &intl("5678"), &message, DataCoding::Default, 0, SendSmsOptions::default())
            .await
            .unwrap();
        id
    });

    for (expected_len, reply_id) in [(153usize, "msg001"), (47usize, "msg002")] {
        let req = read_frame(&mut smsc).await.unwrap().unwrap();
        match &req {
            Frame::SubmitSm(_, body) => {
                assert_eq!(body.short_message.len(), expected_len);
                assert_eq!(body.tlvs.len(), 3);
                assert_eq!(body.tlvs[1].as_u8(), Some(2));
            }
            other => panic!("expected submit_sm, got {other:?}"),
        }
        let resp = Frame::SubmitSmResp(
            PduHeader::for_command(CommandId::SubmitSmResp, CommandStatus::OK, req.sequence_number()),
            SubmitSmResponse {
                message_id: reply_id.to_string(),
            },
        );
        write_frame(&mut smsc, &resp).await.unwrap();
    }

    let id = submit_task.await.unwrap();
    assert_eq!(id, "msg001");
}

#[tokio::test]
async fn s5_unsupported_split_performs_no_writes() {
    let (mut client, mut smsc) = bound_transmitter().await;
    let message: String = "A".repeat(200);

    let err = client
        .send_sms(&intl("1234"), &intl("5678"), &message, DataCoding::Binary, 0, SendSmsOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SmppError::UnsupportedCodingForSplit));

    // Prove no PDU arrived: a follow-up enquire_link must be the first frame read.
    let enquire_task = tokio::spawn(async move {
        client.enquire_link().await.unwrap();
    });
    let req = read_frame(&mut smsc).await.unwrap().unwrap();
    assert!(matches!(req, Frame::EnquireLink(_)));
    let resp = Frame::EnquireLinkResp(PduHeader::for_command(
        CommandId::EnquireLinkResp,
        CommandStatus::OK,
        req.sequence_number(),
    ));
    write_frame(&mut smsc, &resp).await.unwrap();
    enquire_task.await.unwrap();
}

#[tokio::test]
async fn s6_query_delivered() {
    let (mut client, mut smsc) = bound_transmitter().await;

    let query_task = tokio::spawn(async move {
        let result = client.query_status("msg123", &intl("1234")).await.unwrap();
        result
    });

    let req = read_frame(&mut smsc).await.unwrap().unwrap();
    assert!(matches!(req, Frame::QuerySm(_, _)));
    let resp = Frame::QuerySmResp(
        PduHeader::for_command(CommandId::QuerySmResp, CommandStatus::OK, req.sequence_number()),
        QuerySmResponse {
            message_id: "msg123".to_string(),
            final_date: "260124120000000+".to_string(),
            message_state: 2,
            error_code: 0,
        },
    );
    write_frame(&mut smsc, &resp).await.unwrap();

    let result = query_task.await.unwrap().unwrap();
    assert_eq!(result.message_id, "msg123");
    assert_eq!(result.message_state, 2);
    assert_eq!(result.error_code, 0);
}

#[tokio::test]
async fn s7_delivery_receipt_parsed() {
    let (client_side, mut smsc) = duplex(8192);
    let mut client = Client::from_transport(client_side, test_config());

    let bind_task = tokio::spawn(async move {
        client.bind_receiver("system_id", "password").await.unwrap();
        client
    });
    let bind_req = read_frame(&mut smsc).await.unwrap().unwrap();
    write_frame(
        &mut smsc,
        &Frame::BindReceiverResp(
            PduHeader::for_command(CommandId::BindReceiverResp, CommandStatus::OK, bind_req.sequence_number()),
            BindResponse {
                system_id: "smsc-sim".to_string(),
            },
        ),
    )
    .await
    .unwrap();
    let mut client = bind_task.await.unwrap();

    let receipt_body = "id:msg123 sub:001 dlvrd:001 submit date:2601221200 done date:2601221201 stat:DELIVRD err:000 text:Test";
    let deliver = DeliverSm {
        service_type: String::new(),
        source_addr: Address::unknown("SMSC").unwrap(),
        dest_addr: intl("1234"),
        esm_class: 0x04,
        protocol_id: 0,
        priority_flag: 0,
        schedule_delivery_time: String::new(),
        validity_period: String::new(),
        registered_delivery: 0,
        replace_if_present_flag: 0,
        data_coding: 0,
        sm_default_msg_id: 0,
        short_message: Bytes::from(receipt_body.to_string()),
        tlvs: vec![],
    };
    write_frame(
        &mut smsc,
        &Frame::DeliverSm(PduHeader::for_command(CommandId::DeliverSm, CommandStatus::OK, 77), Box::new(deliver)),
    )
    .await
    .unwrap();

    // The session auto-acks DELIVER_SM_RESP before the façade ever sees it.
    let ack = read_frame(&mut smsc).await.unwrap().unwrap();
    assert!(matches!(ack, Frame::DeliverSmResp(_, _)));
    assert_eq!(ack.sequence_number(), 77);

    let parsed = client.read_sms().await.unwrap().unwrap();
    match parsed {
        ParsedMessage::Receipt(receipt) => {
            assert_eq!(receipt.fields.id, "msg123");
            assert_eq!(receipt.fields.stat, "DELIVRD");
        }
        ParsedMessage::Sms(_) => panic!("expected a delivery receipt"),
    }
}

#[tokio::test]
async fn s8_auto_keep_alive_reply_during_pending_request() {
    let (mut client, mut smsc) = bound_transmitter().await;

    let submit_task = tokio::spawn(async move {
        client
            .send_sms(&intl("1234"), &intl("5678"), "Hello", DataCoding::Default, 0, SendSmsOptions::default())
            .await
            .unwrap()
    });

    let submit_req = read_frame(&mut smsc).await.unwrap().unwrap();

    // Before answering the submit, the peer pings with ENQUIRE_LINK.
    write_frame(
        &mut smsc,
        &Frame::EnquireLink(PduHeader::for_command(CommandId::EnquireLink, CommandStatus::OK, 42)),
    )
    .await
    .unwrap();

    let keepalive_resp = read_frame(&mut smsc).await.unwrap().unwrap();
    assert!(matches!(keepalive_resp, Frame::EnquireLinkResp(_)));
    assert_eq!(keepalive_resp.sequence_number(), 42);

    write_frame(
        &mut smsc,
        &Frame::SubmitSmResp(
            PduHeader::for_command(CommandId::SubmitSmResp, CommandStatus::OK, submit_req.sequence_number()),
            SubmitSmResponse {
                message_id: "msg001".to_string(),
            },
        ),
    )
    .await
    .unwrap();

    let id = submit_task.await.unwrap();
    assert_eq!(id, "msg001");
}

#[tokio::test]
async fn s9_bind_failure_closes_session() {
    let (client_side, mut smsc) = duplex(8192);
    let mut client = Client::from_transport(client_side, test_config());

    let bind_task = tokio::spawn(async move {
        let err = client.bind_transmitter("system_id", "wrong").await.unwrap_err();
        (client, err)
    });

    let req = read_frame(&mut smsc).await.unwrap().unwrap();
    write_frame(
        &mut smsc,
        &Frame::BindTransmitterResp(
            PduHeader::for_command(
                CommandId::BindTransmitterResp,
                CommandStatus::BIND_FAILED,
                req.sequence_number(),
            ),
            BindResponse {
                system_id: String::new(),
            },
        ),
    )
    .await
    .unwrap();

    let (client, err) = bind_task.await.unwrap();
    assert!(matches!(err, SmppError::BindFailed(status) if status == CommandStatus::BIND_FAILED));
    assert_eq!(client.state().await, smpp_client::SessionState::Closed);
}

#[tokio::test]
async fn payload_tlv_method_never_splits() {
    let config = ClientConfigBuilder::new()
        .csms_method(CsmsMethod::PayloadTlv)
        .read_timeout(Duration::from_millis(500))
        .connect_timeout(Duration::from_millis(500))
        .build();
    let (client_side, mut smsc) = duplex(8192);
    let mut client = Client::from_transport(client_side, config);

    let bind_task = tokio::spawn(async move {
        client.bind_transmitter("system_id", "password").await.unwrap();
        client
    });
    let bind_req = read_frame(&mut smsc).await.unwrap().unwrap();
    write_frame(
        &mut smsc,
        &Frame::BindTransmitterResp(
            PduHeader::for_command(CommandId::BindTransmitterResp, CommandStatus::OK, bind_req.sequence_number()),
            BindResponse {
                system_id: "smsc-sim".to_string(),
            },
        ),
    )
    .await
    .unwrap();
    let mut client = bind_task.await.unwrap();

    let message: String = "B".repeat(1000);
    let submit_task = tokio::spawn(async move {
        client
            .send_sms(&intl("1234"), &intl("5678"), &message, DataCoding::Binary, 0, SendSmsOptions::default())
            .await
            .unwrap()
    });

    let req = read_frame(&mut smsc).await.unwrap().unwrap();
    match &req {
        Frame::SubmitSm(_, body) => {
            assert!(body.short_message.is_empty());
            assert_eq!(body.tlvs.len(), 1);
        }
        other => panic!("expected submit_sm, got {other:?}"),
    }
    write_frame(
        &mut smsc,
        &Frame::SubmitSmResp(
            PduHeader::for_command(CommandId::SubmitSmResp, CommandStatus::OK, req.sequence_number()),
            SubmitSmResponse {
                message_id: "msg900".to_string(),
            },
        ),
    )
    .await
    .unwrap();

    let id = submit_task.await.unwrap();
    assert_eq!(id, "msg900");
}

#[tokio::test]
async fn send_sms_options_attach_schedule_validity_and_custom_tlv() {
    let (mut client, mut smsc) = bound_transmitter().await;

    let options = SendSmsOptions {
        tags: vec![Tlv::u8(0x1234, 7)],
        schedule_delivery_time: "260101000000000+".to_string(),
        validity_period: "260102000000000+".to_string(),
    };
    let submit_task = tokio::spawn(async move {
        client
            .send_sms(&intl("1234"), &intl("5678"), "Hello", DataCoding::Default, 0, options)
            .await
            .unwrap()
    });

    let req = read_frame(&mut smsc).await.unwrap().unwrap();
    match &req {
        Frame::SubmitSm(_, body) => {
            assert_eq!(body.schedule_delivery_time, "260101000000000+");
            assert_eq!(body.validity_period, "260102000000000+");
            assert!(body.tlvs.iter().any(|t| t.tag == 0x1234 && t.as_u8() == Some(7)));
        }
        other => panic!("expected submit_sm, got {other:?}"),
    }
    write_frame(
        &mut smsc,
        &Frame::SubmitSmResp(
            PduHeader::for_command(CommandId::SubmitSmResp, CommandStatus::OK, req.sequence_number()),
            SubmitSmResponse {
                message_id: "msg777".to_string(),
            },
        ),
    )
    .await
    .unwrap();

    let id = submit_task.await.unwrap();
    assert_eq!(id, "msg777");
}

#[tokio::test]
async fn s7_malformed_receipt_text_still_yields_receipt() {
    let (client_side, mut smsc) = duplex(8192);
    let mut client = Client::from_transport(client_side, test_config());

    let bind_task = tokio::spawn(async move {
        client.bind_receiver("system_id", "password").await.unwrap();
        client
    });
    let bind_req = read_frame(&mut smsc).await.unwrap().unwrap();
    write_frame(
        &mut smsc,
        &Frame::BindReceiverResp(
            PduHeader::for_command(CommandId::BindReceiverResp, CommandStatus::OK, bind_req.sequence_number()),
            BindResponse {
                system_id: "smsc-sim".to_string(),
            },
        ),
    )
    .await
    .unwrap();
    let mut client = bind_task.await.unwrap();

    let deliver = DeliverSm {
        service_type: String::new(),
        source_addr: Address::unknown("SMSC").unwrap(),
        dest_addr: intl("1234"),
        esm_class: 0x04,
        protocol_id: 0,
        priority_flag: 0,
        schedule_delivery_time: String::new(),
        validity_period: String::new(),
        registered_delivery: 0,
        replace_if_present_flag: 0,
        data_coding: 0,
        sm_default_msg_id: 0,
        short_message: Bytes::from_static(b"truncated by a flaky SMSC"),
        tlvs: vec![],
    };
    write_frame(
        &mut smsc,
        &Frame::DeliverSm(PduHeader::for_command(CommandId::DeliverSm, CommandStatus::OK, 78), Box::new(deliver)),
    )
    .await
    .unwrap();

    let ack = read_frame(&mut smsc).await.unwrap().unwrap();
    assert!(matches!(ack, Frame::DeliverSmResp(_, _)));

    let parsed = client.read_sms().await.unwrap().unwrap();
    assert!(matches!(parsed, ParsedMessage::Receipt(_)));
}
