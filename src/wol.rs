//! Wake-on-LAN magic packet construction and transmission.
//!
//! A magic packet is 6 bytes of `0xFF` followed by the target's MAC
//! repeated 16 times, 102 bytes total. It is sent as a single UDP
//! datagram to the broadcast address because the target, being powered
//! off, has no unicast route.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use tokio::net::UdpSocket;

/// Octets in an EUI-48 hardware address.
const MAC_LEN: usize = 6;

/// Times the MAC is repeated after the `0xFF` header.
const MAC_REPETITIONS: usize = 16;

/// Total magic packet size: header plus repetitions.
pub const MAGIC_PACKET_LEN: usize = MAC_LEN + MAC_LEN * MAC_REPETITIONS;

/// A parsed hardware (MAC) address, held as its six EUI-48 octets.
///
/// Parsing accepts the standard colon- or hyphen-separated hex notation
/// with either 6 (EUI-48) or 8 (EUI-64) groups; an EUI-64 input keeps
/// its leading six octets, which is what the wake payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr([u8; MAC_LEN]);

impl MacAddr {
    pub const fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }
}

impl From<[u8; MAC_LEN]> for MacAddr {
    fn from(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        )
    }
}

/// Error returned when a string is not a valid MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacParseError;

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid MAC address syntax")
    }
}

impl std::error::Error for MacParseError {}

impl FromStr for MacAddr {
    type Err = MacParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Groups must use one separator consistently; a mixed string
        // leaves the other separator inside a group and fails the hex
        // digit check below.
        let sep = if s.contains(':') { ':' } else { '-' };

        let groups: Vec<&str> = s.split(sep).collect();
        if groups.len() != 6 && groups.len() != 8 {
            return Err(MacParseError);
        }

        let mut octets = [0u8; MAC_LEN];
        for (i, group) in groups.iter().enumerate() {
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(MacParseError);
            }
            // Octets past the EUI-48 prefix are validated but not kept.
            if i < MAC_LEN {
                octets[i] = u8::from_str_radix(group, 16).map_err(|_| MacParseError)?;
            }
        }

        Ok(Self(octets))
    }
}

/// Build the 102-byte wake payload for `mac`.
#[must_use]
pub fn magic_packet(mac: &MacAddr) -> [u8; MAGIC_PACKET_LEN] {
    let mut packet = [0xff; MAGIC_PACKET_LEN];
    for chunk in packet[MAC_LEN..].chunks_exact_mut(MAC_LEN) {
        chunk.copy_from_slice(&mac.octets());
    }
    packet
}

/// Failure modes of a wake attempt.
///
/// The display texts double as the HTTP response bodies.
#[derive(Debug)]
pub enum WakeError {
    /// The UDP socket could not be opened or configured.
    Socket(std::io::Error),
    /// The datagram write failed.
    Io(std::io::Error),
}

impl fmt::Display for WakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket(_) => f.write_str("Socket error"),
            Self::Io(_) => f.write_str("I/O error"),
        }
    }
}

impl std::error::Error for WakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Socket(err) | Self::Io(err) => Some(err),
        }
    }
}

/// Send one magic packet for `mac` to `target` as a single datagram.
///
/// The socket is request-local: opened here, dropped on every exit path.
/// Wake-on-LAN gives no acknowledgment, so a successful return only
/// means the datagram left this host.
pub async fn send_magic_packet(mac: &MacAddr, target: SocketAddr) -> Result<(), WakeError> {
    let socket = UdpSocket::bind("0.0.0.0:0").await.map_err(WakeError::Socket)?;
    socket.set_broadcast(true).map_err(WakeError::Socket)?;

    let packet = magic_packet(mac);
    socket.send_to(&packet, target).await.map_err(WakeError::Io)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_colon_notation() {
        let mac: MacAddr = "01:23:45:67:89:ab".parse().unwrap();
        assert_eq!(mac.octets(), [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
    }

    #[test]
    fn test_parse_hyphen_and_uppercase() {
        let mac: MacAddr = "00-1A-2B-3C-4D-5E".parse().unwrap();
        assert_eq!(mac.octets(), [0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    }

    #[test]
    fn test_parse_eui64_keeps_leading_octets() {
        let mac: MacAddr = "01:23:45:67:89:ab:cd:ef".parse().unwrap();
        assert_eq!(mac.octets(), [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("zz:zz:zz:zz:zz:zz".parse::<MacAddr>().is_err());
        assert!("01:23:45:67:89".parse::<MacAddr>().is_err());
        assert!("01:23:45:67:89:ab:cd".parse::<MacAddr>().is_err());
        assert!("1:2:3:4:5:6".parse::<MacAddr>().is_err());
        assert!("01-23:45-67:89-ab".parse::<MacAddr>().is_err());
        assert!("".parse::<MacAddr>().is_err());
        // from_str_radix would accept a sign here; the digit check must not
        assert!("+1:23:45:67:89:ab".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_display_lowercase_colon() {
        let mac: MacAddr = "00-1A-2B-3C-4D-5E".parse().unwrap();
        assert_eq!(mac.to_string(), "00:1a:2b:3c:4d:5e");
    }

    #[test]
    fn test_magic_packet_layout() {
        let mac: MacAddr = "01:23:45:67:89:ab".parse().unwrap();
        let packet = magic_packet(&mac);

        assert_eq!(packet.len(), 102);
        assert!(packet[..6].iter().all(|&b| b == 0xff));
        for chunk in packet[6..].chunks_exact(6) {
            assert_eq!(chunk, [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
        }
    }

    #[test]
    fn test_magic_packet_deterministic() {
        let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(magic_packet(&mac), magic_packet(&mac));
    }

    #[test]
    fn test_wake_error_display() {
        let socket = WakeError::Socket(std::io::Error::other("bind failed"));
        let io = WakeError::Io(std::io::Error::other("write failed"));
        assert_eq!(socket.to_string(), "Socket error");
        assert_eq!(io.to_string(), "I/O error");
    }

    #[tokio::test]
    async fn test_send_delivers_payload() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap();

        let mac: MacAddr = "01:23:45:67:89:ab".parse().unwrap();
        send_magic_packet(&mac, target).await.unwrap();

        let mut buf = [0u8; 256];
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), receiver.recv_from(&mut buf))
            .await
            .expect("no datagram received")
            .unwrap();

        assert_eq!(len, MAGIC_PACKET_LEN);
        assert_eq!(&buf[..len], magic_packet(&mac));
    }

    #[tokio::test]
    async fn test_concurrent_sends_are_independent() {
        let rx_a = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let rx_b = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target_a = rx_a.local_addr().unwrap();
        let target_b = rx_b.local_addr().unwrap();

        let mac_a: MacAddr = "01:23:45:67:89:ab".parse().unwrap();
        let mac_b: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();

        let (sent_a, sent_b) = tokio::join!(
            send_magic_packet(&mac_a, target_a),
            send_magic_packet(&mac_b, target_b),
        );
        sent_a.unwrap();
        sent_b.unwrap();

        let mut buf = [0u8; 256];
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), rx_a.recv_from(&mut buf))
            .await
            .expect("no datagram on first receiver")
            .unwrap();
        assert_eq!(&buf[..len], magic_packet(&mac_a));

        let (len, _) = tokio::time::timeout(Duration::from_secs(5), rx_b.recv_from(&mut buf))
            .await
            .expect("no datagram on second receiver")
            .unwrap();
        assert_eq!(&buf[..len], magic_packet(&mac_b));
    }
}
