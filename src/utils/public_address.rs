//! Public address-space checks for validated URLs.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Host names that always resolve to the local machine or a private network.
const RESERVED_SUFFIXES: &[&str] = &[".localhost", ".local", ".internal", ".localdomain", ".home.arpa"];

/// Returns true if `ip` is routable on the public internet.
///
/// Rejects loopback, private, link-local, carrier-grade NAT, documentation,
/// benchmarking, multicast, broadcast, reserved and unspecified ranges.
/// IPv4-mapped IPv6 addresses are judged by their IPv4 form.
pub fn is_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_ipv4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_public_ipv4(v4),
            None => is_public_ipv6(v6),
        },
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, _, _] = ip.octets();

    let shared = a == 100 && (64..=127).contains(&b);
    let benchmarking = a == 198 && (b == 18 || b == 19);
    let reserved = a >= 240;
    let this_network = a == 0;

    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || ip.is_unspecified()
        || shared
        || benchmarking
        || reserved
        || this_network)
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];

    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    let documentation = first == 0x2001 && ip.segments()[1] == 0x0db8;

    !(ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        || unique_local
        || link_local
        || documentation)
}

/// Returns true for host names reserved for local use (`localhost`, `*.local`, ...).
pub fn is_reserved_hostname(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();

    host == "localhost" || RESERVED_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
}
