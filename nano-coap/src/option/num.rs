// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// Type representing a CoAP option number.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct OptionNumber(pub u16);

impl OptionNumber {
    /// IF_MATCH option.
    pub const IF_MATCH: OptionNumber = OptionNumber(1);

    /// URI_HOST option.
    pub const URI_HOST: OptionNumber = OptionNumber(3);

    /// ETAG option.
    pub const ETAG: OptionNumber = OptionNumber(4);

    /// IF_NONE_MATCH option.
    pub const IF_NONE_MATCH: OptionNumber = OptionNumber(5);

    /// URI_PORT option.
    pub const URI_PORT: OptionNumber = OptionNumber(7);

    /// LOCATION_PATH option.
    pub const LOCATION_PATH: OptionNumber = OptionNumber(8);

    /// URI_PATH option.
    pub const URI_PATH: OptionNumber = OptionNumber(11);

    /// CONTENT_FORMAT option.
    pub const CONTENT_FORMAT: OptionNumber = OptionNumber(12);

    /// MAX_AGE option.
    pub const MAX_AGE: OptionNumber = OptionNumber(14);

    /// URI_QUERY option.
    pub const URI_QUERY: OptionNumber = OptionNumber(15);

    /// ACCEPT option.
    pub const ACCEPT: OptionNumber = OptionNumber(17);

    /// LOCATION_QUERY option.
    pub const LOCATION_QUERY: OptionNumber = OptionNumber(20);

    /// PROXY_URI option.
    pub const PROXY_URI: OptionNumber = OptionNumber(35);

    /// PROXY_SCHEME option.
    pub const PROXY_SCHEME: OptionNumber = OptionNumber(39);

    /// Returns true if this option number is critical, false if it is optional.
    pub fn is_critical(self) -> bool {
        const FLAG_CRITICAL: u16 = 1;
        self.0 & FLAG_CRITICAL == FLAG_CRITICAL
    }

    /// Returns true if this option is "un-safe".
    pub fn is_un_safe(self) -> bool {
        const FLAG_UN_SAFE: u16 = 2;
        self.0 & FLAG_UN_SAFE == FLAG_UN_SAFE
    }
}

impl Default for OptionNumber {
    fn default() -> Self {
        OptionNumber(0)
    }
}

impl core::ops::Sub for OptionNumber {
    type Output = u16;

    fn sub(self, rhs: OptionNumber) -> u16 {
        self.0 - rhs.0
    }
}

impl core::convert::From<OptionNumber> for u16 {
    fn from(number: OptionNumber) -> Self {
        number.0
    }
}

impl std::fmt::Display for OptionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            OptionNumber::IF_MATCH => f.write_str("If-Match"),
            OptionNumber::URI_HOST => f.write_str("Uri-Host"),
            OptionNumber::ETAG => f.write_str("ETag"),
            OptionNumber::IF_NONE_MATCH => f.write_str("If-None-Match"),
            OptionNumber::URI_PORT => f.write_str("Uri-Port"),
            OptionNumber::LOCATION_PATH => f.write_str("Location-Path"),
            OptionNumber::URI_PATH => f.write_str("Uri-Path"),
            OptionNumber::CONTENT_FORMAT => f.write_str("Content-Format"),
            OptionNumber::MAX_AGE => f.write_str("Max-Age"),
            OptionNumber::URI_QUERY => f.write_str("Uri-Query"),
            OptionNumber::ACCEPT => f.write_str("Accept"),
            OptionNumber::LOCATION_QUERY => f.write_str("Location-Query"),
            OptionNumber::PROXY_URI => f.write_str("Proxy-Uri"),
            OptionNumber::PROXY_SCHEME => f.write_str("Proxy-Scheme"),
            OptionNumber(x) => write!(f, "Option-{}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties() {
        // odd option numbers are critical
        assert!(OptionNumber::URI_PATH.is_critical());
        assert!(!OptionNumber::CONTENT_FORMAT.is_critical());
        assert!(OptionNumber::URI_HOST.is_un_safe());
        assert!(!OptionNumber::URI_PATH.is_un_safe());
    }

    #[test]
    fn ordering() {
        assert!(OptionNumber::URI_HOST < OptionNumber::URI_PATH);
        assert_eq!(OptionNumber::URI_QUERY - OptionNumber::URI_PATH, 4);
    }
}
