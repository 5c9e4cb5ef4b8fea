//! Personal-data masking for message content.
//!
//! [`mask_pii`] rewrites passwords, resident registration numbers, card and
//! phone numbers, e-mail addresses, account numbers, URLs and Korean postal
//! addresses into fixed placeholders. Passes run in a fixed order so that
//! a card number is never half-masked as a phone number.
//!
//! Only content is masked. Senders and time labels are left untouched; use
//! [`mask_store`] to mask a whole conversation.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::store::DailyChatStore;

const SIDO: &str = "서울|부산|대구|인천|광주|대전|울산|세종|경기|강원|충북|충남|전북|전남|경북|경남|제주";
const SIDO_SUFFIX: &str = "특별시|광역시|특별자치시|특별자치도|도";

/// Placeholder for a masked URL.
pub const URL_PLACEHOLDER: &str = "[URL 마스킹됨]";
/// Placeholder for a masked street or lot address.
pub const ADDRESS_PLACEHOLDER: &str = "[주소 마스킹됨]";
/// Placeholder for a masked building unit.
pub const DETAIL_ADDRESS_PLACEHOLDER: &str = "[상세주소 마스킹됨]";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("PII regex")
}

static PASSWORD: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)(비번|비밀번호|패스워드|pw|password|pass|pin|code)\s*[:=]?\s*([a-zA-Z0-9!@#$%^&*()_+\-=]+)")
});

static RRN: LazyLock<Regex> = LazyLock::new(|| compile(r"[0-9]{6}[- .]?[1-4][0-9]{6}"));

static CARD: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[0-9]{4}[- ]?[0-9]{4}[- ]?[0-9]{4}[- ]?[0-9]{4}"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(01[016789]|02|0[3-9][0-9])[- .]?([0-9]{3,4})[- .]?([0-9]{4})"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}"));

static ACCOUNT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[0-9]{3,6}-[0-9]{2,6}-[0-9]{3,6}(?:-?[0-9]{1,5})?"));

static URL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"https?://[\w\-._~:/?#\[\]@!$&'()*+,;=%]+"));

// 서울 강남구 테헤란로 123, 경기도 성남시 분당구 판교로 123길 45
static ROAD_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?:{SIDO})(?:{SIDO_SUFFIX})?\s*(?:[가-힣]+(?:시|군|구)\s*)*[가-힣0-9]+(?:로|길)\s*[0-9]+(?:-[0-9]+)?(?:\s*,?\s*[가-힣0-9]+(?:동|층|호|빌딩|타워|아파트|오피스텔))?"
    ))
});

// 서울 강남구 역삼동 123-45, 역삼동 123번지
static LOT_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?:(?:{SIDO})(?:{SIDO_SUFFIX})?\s*)?(?:[가-힣]+(?:시|군|구)\s*)*[가-힣0-9]+(?:동|읍|면|리)\s*[0-9]+(?:-[0-9]+)?(?:번지)?"
    ))
});

// OO빌딩 3층, OO아파트 102동 1503호
static BUILDING_DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"[가-힣a-zA-Z0-9]+(?:빌딩|타워|센터|아파트|오피스텔|주상복합|상가)\s*(?:[0-9]+동\s*)?[0-9]+(?:층|호)")
});

fn star_digits(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_digit() { '*' } else { c })
        .collect()
}

fn mask_email(caps: &Captures<'_>) -> String {
    let email = &caps[0];
    match email.find('@') {
        Some(at) if at > 2 => format!("{}**@****.***", &email[..2]),
        _ => "***@****.***".to_string(),
    }
}

/// Masks personal data in one message body.
///
/// ```
/// use talkpack::core::mask_pii;
///
/// assert_eq!(mask_pii("내 번호 010-1234-5678"), "내 번호 010-****-****");
/// assert_eq!(mask_pii("비번 hunter2"), "비번 ****");
/// ```
pub fn mask_pii(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let masked = PASSWORD.replace_all(content, "$1 ****");
    let masked = RRN.replace_all(&masked, "******-*******");
    let masked = CARD.replace_all(&masked, |caps: &Captures<'_>| star_digits(&caps[0]));
    let masked = PHONE.replace_all(&masked, "$1-****-****");
    let masked = EMAIL.replace_all(&masked, mask_email);
    let masked = ACCOUNT.replace_all(&masked, |caps: &Captures<'_>| {
        let account = &caps[0];
        if account.len() >= 11 {
            star_digits(account)
        } else {
            account.to_string()
        }
    });
    let masked = URL.replace_all(&masked, URL_PLACEHOLDER);
    let masked = ROAD_ADDRESS.replace_all(&masked, ADDRESS_PLACEHOLDER);
    let masked = LOT_ADDRESS.replace_all(&masked, ADDRESS_PLACEHOLDER);
    let masked = BUILDING_DETAIL.replace_all(&masked, DETAIL_ADDRESS_PLACEHOLDER);
    masked.into_owned()
}

/// Builds a copy of `store` with every message body masked.
pub fn mask_store(store: &DailyChatStore) -> DailyChatStore {
    store.map_content(mask_pii)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use chrono::NaiveDate;

    #[test]
    fn test_password_keywords() {
        assert_eq!(mask_pii("비번 1234"), "비번 ****");
        assert_eq!(mask_pii("PW: abc!23"), "PW ****");
        assert_eq!(mask_pii("password=secret"), "password ****");
    }

    #[test]
    fn test_resident_number() {
        assert_eq!(mask_pii("900101-1234567"), "******-*******");
    }

    #[test]
    fn test_card_before_phone() {
        assert_eq!(mask_pii("1234-5678-9012-3456"), "****-****-****-****");
    }

    #[test]
    fn test_phone_numbers() {
        assert_eq!(mask_pii("010-1234-5678"), "010-****-****");
        assert_eq!(mask_pii("01012345678로 연락"), "010-****-****로 연락");
        assert_eq!(mask_pii("02-123-4567"), "02-****-****");
    }

    #[test]
    fn test_email() {
        assert_eq!(mask_pii("test@naver.com"), "te**@****.***");
        assert_eq!(mask_pii("ab@x.io"), "***@****.***");
    }

    #[test]
    fn test_account_number_requires_length() {
        assert_eq!(mask_pii("110-123-456789"), "***-***-******");
        assert_eq!(mask_pii("123-45-678"), "123-45-678");
    }

    #[test]
    fn test_url() {
        assert_eq!(mask_pii("여기 https://map.naver.com/p/abc?x=1"), "여기 [URL 마스킹됨]");
    }

    #[test]
    fn test_addresses() {
        assert_eq!(mask_pii("서울 강남구 테헤란로 123"), ADDRESS_PLACEHOLDER);
        assert_eq!(mask_pii("역삼동 123-45에서 봐"), "[주소 마스킹됨]에서 봐");
        assert!(mask_pii("OO빌딩 3층 앞").contains(DETAIL_ADDRESS_PLACEHOLDER));
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(mask_pii("오늘 점심 뭐 먹지"), "오늘 점심 뭐 먹지");
        assert_eq!(mask_pii(""), "");
    }

    #[test]
    fn test_mask_store_keeps_senders() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        let mut store = DailyChatStore::new();
        store.push(day, Message::new("010-1111-2222", "오전 9:00", "call 010-1234-5678"));

        let masked = mask_store(&store);
        let msg = &masked.messages_on(day)[0];
        assert_eq!(msg.sender(), Some("010-1111-2222"));
        assert_eq!(msg.content(), "call 010-****-****");
    }
}
