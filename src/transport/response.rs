use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{ApiError, ApiErrorCode, ParsedResponse, ProtocolError, ResponseToken};

// `.` excludes `\n`, so the payload is a single line. One trailing line
// terminator is tolerated.
static RESPONSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A((OK|ERROR|FAILURE) (.+))\n?\z").expect("response grammar is a valid regex")
});

/// Match a response body against `<TOKEN> <payload>`.
pub fn parse_response(body: &str) -> Result<ParsedResponse, ProtocolError> {
    parse_line(body).map(|(_, parsed)| parsed)
}

/// Interpret a response body: the payload of an `OK` line, or a classified error.
pub fn interpret_response(body: &str) -> Result<String, ProtocolError> {
    let (line, parsed) = parse_line(body)?;
    match parsed.token.error_family() {
        None => Ok(parsed.payload),
        Some(family) => Err(ProtocolError::Api(ApiError::new(
            family,
            ApiErrorCode::new(line),
        ))),
    }
}

fn parse_line(body: &str) -> Result<(&str, ParsedResponse), ProtocolError> {
    let invalid = || ProtocolError::InvalidResponse {
        body: body.to_owned(),
    };
    let captures = RESPONSE_LINE.captures(body).ok_or_else(invalid)?;

    let (Some(line), Some(token), Some(payload)) = (captures.get(1), captures.get(2), captures.get(3))
    else {
        return Err(invalid());
    };
    let token = match token.as_str() {
        "OK" => ResponseToken::Ok,
        "ERROR" => ResponseToken::Error,
        "FAILURE" => ResponseToken::Failure,
        _ => return Err(invalid()),
    };

    Ok((
        line.as_str(),
        ParsedResponse {
            token,
            payload: payload.as_str().to_owned(),
        },
    ))
}
