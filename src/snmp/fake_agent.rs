//! Minimal in-process SNMP agent for exercising the walk loops over UDP.
//!
//! Answers GETNEXT and GETBULK from a static table. v1 requests past the end
//! get noSuchName, v2c requests get endOfMibView.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

const GET_NEXT: u8 = 0xa1;
const GET_BULK: u8 = 0xa5;
const RESPONSE: u8 = 0xa2;

#[derive(Debug, Clone)]
pub enum FakeValue {
    Str(&'static str),
    Oid(&'static str),
    Ticks(u32),
    NoSuchInstance,
    EndOfMibView,
    Null,
}

#[derive(Debug, Clone, Default)]
pub struct FakeMib {
    entries: BTreeMap<Vec<u64>, FakeValue>,
    /// GETNEXT of the first OID answers with the second
    loop_back: Option<(Vec<u64>, Vec<u64>)>,
}

impl FakeMib {
    pub fn with(mut self, oid: &str, value: FakeValue) -> Self {
        self.entries.insert(arcs(oid), value);
        self
    }

    pub fn loop_back(mut self, from: &str, to: &str) -> Self {
        self.loop_back = Some((arcs(from), arcs(to)));
        self
    }

    fn next_after(&self, oid: &[u64]) -> Option<(Vec<u64>, FakeValue)> {
        if let Some((from, to)) = &self.loop_back {
            if from.as_slice() == oid {
                return self.entries.get(to).map(|v| (to.clone(), v.clone()));
            }
        }
        self.entries
            .range((Bound::Excluded(oid.to_vec()), Bound::Unbounded))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))
    }
}

/// sysDescr, sysObjectID, sysUpTime and sysName of a SONiC switch.
pub fn system_group() -> FakeMib {
    FakeMib::default()
        .with(
            "1.3.6.1.2.1.1.1.0",
            FakeValue::Str("SONiC Software Version: SONiC.1.0.0 - HwSku: Force10-S6000"),
        )
        .with("1.3.6.1.2.1.1.2.0", FakeValue::Oid("1.3.6.1.4.1.8072.3.2.10"))
        .with("1.3.6.1.2.1.1.3.0", FakeValue::Ticks(4200))
        .with("1.3.6.1.2.1.1.5.0", FakeValue::Str("vlab-01"))
}

pub struct FakeAgent {
    pub addr: String,
    pub port: u16,
    requests: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl FakeAgent {
    pub async fn start(mib: FakeMib) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let local = socket.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();

        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(reply) = respond(&mib, &buf[..len]) {
                    let _ = socket.send_to(&reply, peer).await;
                }
            }
        });

        Self {
            addr: local.to_string(),
            port: local.port(),
            requests,
            task,
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for FakeAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn respond(mib: &FakeMib, packet: &[u8]) -> Option<Vec<u8>> {
    let (_, message, _) = read_tlv(packet)?;
    let (_, version, rest) = read_tlv(message)?;
    let (_, community, rest) = read_tlv(rest)?;
    let (pdu_type, pdu, _) = read_tlv(rest)?;
    let (_, req_id, rest) = read_tlv(pdu)?;
    let (_, _non_repeaters, rest) = read_tlv(rest)?;
    let (_, max_repetitions, rest) = read_tlv(rest)?;
    let (_, mut list, _) = read_tlv(rest)?;

    let mut requested = Vec::new();
    while !list.is_empty() {
        let (_, varbind, more) = read_tlv(list)?;
        let (_, oid, _) = read_tlv(varbind)?;
        requested.push(decode_oid(oid));
        list = more;
    }

    let version = decode_int(version);
    let mut error_status = 0;
    let mut error_index = 0;
    let mut answers: Vec<(Vec<u64>, FakeValue)> = Vec::new();

    match pdu_type {
        GET_NEXT => {
            for (i, oid) in requested.iter().enumerate() {
                match mib.next_after(oid) {
                    Some(next) => answers.push(next),
                    None if version == 0 => {
                        error_status = 2;
                        error_index = i as i64 + 1;
                        answers = requested.iter().map(|o| (o.clone(), FakeValue::Null)).collect();
                        break;
                    }
                    None => answers.push((oid.clone(), FakeValue::EndOfMibView)),
                }
            }
        }
        GET_BULK => {
            let mut cursor = requested.first()?.clone();
            for _ in 0..decode_int(max_repetitions).max(1) {
                match mib.next_after(&cursor) {
                    Some((oid, value)) => {
                        cursor = oid.clone();
                        answers.push((oid, value));
                    }
                    None => {
                        answers.push((cursor.clone(), FakeValue::EndOfMibView));
                        break;
                    }
                }
            }
        }
        _ => return None,
    }

    let varbinds: Vec<u8> = answers
        .iter()
        .flat_map(|(oid, value)| tlv(0x30, &[encode_oid(oid), encode_value(value)].concat()))
        .collect();
    let body = [
        encode_int(0x02, decode_int(req_id)),
        encode_int(0x02, error_status),
        encode_int(0x02, error_index),
        tlv(0x30, &varbinds),
    ]
    .concat();
    let message = [
        encode_int(0x02, version),
        tlv(0x04, community),
        tlv(RESPONSE, &body),
    ]
    .concat();

    Some(tlv(0x30, &message))
}

fn arcs(oid: &str) -> Vec<u64> {
    oid.split('.').filter_map(|p| p.parse().ok()).collect()
}

/// Splits one BER element into (tag, contents, remainder).
fn read_tlv(buf: &[u8]) -> Option<(u8, &[u8], &[u8])> {
    let tag = *buf.first()?;
    let first = *buf.get(1)? as usize;
    let (len, header) = if first < 0x80 {
        (first, 2)
    } else {
        let n = first & 0x7f;
        let bytes = buf.get(2..2 + n)?;
        (bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize), 2 + n)
    };
    let contents = buf.get(header..header + len)?;
    Some((tag, contents, &buf[header + len..]))
}

fn decode_int(bytes: &[u8]) -> i64 {
    let init: i64 = if bytes.first().is_some_and(|b| b & 0x80 != 0) { -1 } else { 0 };
    bytes.iter().fold(init, |acc, b| (acc << 8) | *b as i64)
}

fn decode_oid(bytes: &[u8]) -> Vec<u64> {
    let mut ids = Vec::new();
    let mut acc = 0u64;
    for b in bytes {
        acc = (acc << 7) | (b & 0x7f) as u64;
        if b & 0x80 == 0 {
            ids.push(acc);
            acc = 0;
        }
    }

    let Some((&first, rest)) = ids.split_first() else {
        return ids;
    };
    let mut arcs = if first < 80 {
        vec![first / 40, first % 40]
    } else {
        vec![2, first - 80]
    };
    arcs.extend_from_slice(rest);
    arcs
}

fn tlv(tag: u8, contents: &[u8]) -> Vec<u8> {
    let len = contents.len();
    let mut out = vec![tag];
    if len < 0x80 {
        out.push(len as u8);
    } else if len < 0x100 {
        out.extend_from_slice(&[0x81, len as u8]);
    } else {
        out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]);
    }
    out.extend_from_slice(contents);
    out
}

fn encode_int(tag: u8, value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 7 {
        let (b, next) = (bytes[start], bytes[start + 1]);
        if (b == 0x00 && next & 0x80 == 0) || (b == 0xff && next & 0x80 != 0) {
            start += 1;
        } else {
            break;
        }
    }
    tlv(tag, &bytes[start..])
}

fn encode_oid(oid: &[u64]) -> Vec<u8> {
    let mut body = Vec::new();
    let mut push = |mut n: u64| {
        let mut chunk = vec![(n & 0x7f) as u8];
        n >>= 7;
        while n > 0 {
            chunk.push((n & 0x7f) as u8 | 0x80);
            n >>= 7;
        }
        chunk.reverse();
        body.extend(chunk);
    };
    push(oid[0] * 40 + oid[1]);
    for &arc in &oid[2..] {
        push(arc);
    }
    tlv(0x06, &body)
}

fn encode_value(value: &FakeValue) -> Vec<u8> {
    match value {
        FakeValue::Str(s) => tlv(0x04, s.as_bytes()),
        FakeValue::Oid(s) => encode_oid(&arcs(s)),
        FakeValue::Ticks(n) => encode_int(0x43, *n as i64),
        FakeValue::NoSuchInstance => vec![0x81, 0x00],
        FakeValue::EndOfMibView => vec![0x82, 0x00],
        FakeValue::Null => vec![0x05, 0x00],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_encoding_reads_back() {
        let oid = arcs("1.3.6.1.4.1.8072.3.2.10");
        let encoded = encode_oid(&oid);
        let (tag, body, rest) = read_tlv(&encoded).unwrap();
        assert_eq!(tag, 0x06);
        assert!(rest.is_empty());
        assert_eq!(decode_oid(body), oid);
    }

    #[test]
    fn integers_use_minimal_twos_complement() {
        assert_eq!(encode_int(0x02, 0), vec![0x02, 0x01, 0x00]);
        assert_eq!(encode_int(0x02, 128), vec![0x02, 0x02, 0x00, 0x80]);
        assert_eq!(encode_int(0x02, -1), vec![0x02, 0x01, 0xff]);
        assert_eq!(decode_int(&[0x00, 0x80]), 128);
        assert_eq!(decode_int(&[0xff]), -1);
    }
}
