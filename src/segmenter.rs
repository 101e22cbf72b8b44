// ABOUTME: Splits an already-encoded message into wire-size-bounded SUBMIT_SM segments
// ABOUTME: per data_coding and CSMS method (spec §4.E). Never silently truncates (invariant #4).

use crate::error::SegmentError;
use crate::pdu::{tags, DataCoding, Tlv};
use bytes::Bytes;

/// How a long message is split across multiple SUBMIT_SM PDUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsmsMethod {
    /// TLV-based segmentation: `SAR_MSG_REF_NUM`/`SAR_TOTAL_SEGMENTS`/`SAR_SEGMENT_SEQNUM`.
    Sar16Bit,
    /// In-band 6-byte User Data Header prepended to each segment's payload.
    Udh8Bit,
    /// No splitting: the whole message rides in one `MESSAGE_PAYLOAD` TLV.
    PayloadTlv,
}

impl Default for CsmsMethod {
    fn default() -> Self {
        CsmsMethod::Sar16Bit
    }
}

const SINGLE_PART_GSM: usize = 254;
const SINGLE_PART_UCS2: usize = 140;
const SAR_GSM_SEGMENT: usize = 153;
const SAR_UCS2_SEGMENT: usize = 134;
const UDH_GSM_SEGMENT: usize = 153;
const UDH_UCS2_SEGMENT: usize = 132;
const UDH_HEADER_LEN: usize = 6;
const MAX_SEGMENTS: usize = 255;

/// One ready-to-send piece of a (possibly single-segment) outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub short_message: Bytes,
    pub tlvs: Vec<Tlv>,
    /// Bits to OR into the SUBMIT_SM `esm_class` (sets UDHI for UDH_8BIT).
    pub esm_class_bits: u8,
}

/// Splits outbound messages, allocating a wrapping 16-bit reference number
/// per multi-segment call (spec §4.E rule 3).
pub struct Segmenter {
    next_ref: u16,
}

impl Segmenter {
    pub fn new(seed: u16) -> Self {
        Segmenter { next_ref: seed }
    }

    fn allocate_ref(&mut self) -> u16 {
        let r = self.next_ref;
        self.next_ref = self.next_ref.wrapping_add(1);
        r
    }

    /// Splits `message` (already encoded to wire bytes for `coding`) into one
    /// or more segments. Returns segments in order; never truncates — an
    /// over-length message with an unsupported coding fails instead
    /// (spec invariant #4).
    pub fn segment(
        &mut self,
        message: &[u8],
        coding: DataCoding,
        method: CsmsMethod,
    ) -> Result<Vec<Segment>, SegmentError> {
        let is_ucs2 = coding == DataCoding::Ucs2;
        let single_budget = if is_ucs2 {
            SINGLE_PART_UCS2
        } else {
            SINGLE_PART_GSM
        };

        if message.len() <= single_budget {
            tracing::debug!(bytes = message.len(), budget = single_budget, segments = 1, "message fits single segment");
            return Ok(vec![Segment {
                short_message: Bytes::copy_from_slice(message),
                tlvs: vec![],
                esm_class_bits: 0,
            }]);
        }

        let splittable_coding = matches!(coding, DataCoding::Default | DataCoding::Ucs2);
        if method != CsmsMethod::PayloadTlv && !splittable_coding {
            tracing::warn!(?coding, ?method, "data coding does not support multi-segment split");
            return Err(SegmentError::UnsupportedCodingForSplit);
        }

        match method {
            CsmsMethod::PayloadTlv => {
                tracing::debug!(bytes = message.len(), segments = 1, "payload tlv carries whole message unsplit");
                Ok(vec![Segment {
                    short_message: Bytes::new(),
                    tlvs: vec![Tlv::new(tags::MESSAGE_PAYLOAD, Bytes::copy_from_slice(message))],
                    esm_class_bits: 0,
                }])
            }
            CsmsMethod::Sar16Bit => self.segment_sar(message, is_ucs2),
            CsmsMethod::Udh8Bit => self.segment_udh(message, is_ucs2),
        }
    }

    fn segment_sar(&mut self, message: &[u8], is_ucs2: bool) -> Result<Vec<Segment>, SegmentError> {
        let per_segment = if is_ucs2 { SAR_UCS2_SEGMENT } else { SAR_GSM_SEGMENT };
        let chunks = chunk_bytes(message, per_segment, is_ucs2);
        if chunks.len() > MAX_SEGMENTS {
            tracing::warn!(segments = chunks.len(), max = MAX_SEGMENTS, "sar split exceeds 255 segments");
            return Err(SegmentError::TooManySegments);
        }
        tracing::debug!(bytes = message.len(), per_segment, segments = chunks.len(), "sar split");
        let total = chunks.len() as u8;
        let reference = self.allocate_ref();
        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| Segment {
                short_message: Bytes::copy_from_slice(chunk),
                tlvs: vec![
                    Tlv::u16(tags::SAR_MSG_REF_NUM, reference),
                    Tlv::u8(tags::SAR_TOTAL_SEGMENTS, total),
                    Tlv::u8(tags::SAR_SEGMENT_SEQNUM, (i + 1) as u8),
                ],
                esm_class_bits: 0,
            })
            .collect())
    }

    fn segment_udh(&mut self, message: &[u8], is_ucs2: bool) -> Result<Vec<Segment>, SegmentError> {
        let per_segment = if is_ucs2 { UDH_UCS2_SEGMENT } else { UDH_GSM_SEGMENT };
        let chunks = chunk_bytes(message, per_segment, is_ucs2);
        if chunks.len() > MAX_SEGMENTS {
            tracing::warn!(segments = chunks.len(), max = MAX_SEGMENTS, "udh split exceeds 255 segments");
            return Err(SegmentError::TooManySegments);
        }
        tracing::debug!(bytes = message.len(), per_segment, segments = chunks.len(), "udh split");
        let total = chunks.len() as u8;
        let reference = (self.allocate_ref() & 0x00FF) as u8;
        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let mut payload = Vec::with_capacity(UDH_HEADER_LEN + chunk.len());
                payload.extend_from_slice(&[0x05, 0x00, 0x03, reference, total, (i + 1) as u8]);
                payload.extend_from_slice(chunk);
                Segment {
                    short_message: Bytes::from(payload),
                    tlvs: vec![],
                    esm_class_bits: 0x40,
                }
            })
            .collect())
    }
}

/// Splits `data` into chunks of at most `max_len` bytes. UCS-2 chunks land on
/// even byte boundaries so a 16-bit code unit is never split across segments
/// (spec §4.E rule 4).
fn chunk_bytes(data: &[u8], max_len: usize, even_boundary: bool) -> Vec<&[u8]> {
    let step = if even_boundary { max_len & !1 } else { max_len };
    data.chunks(step.max(1)).collect()
}
