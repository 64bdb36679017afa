use std::net::Ipv4Addr;

use cumulus_provisioner::validate::{self, Ipv4Cidr};

#[test]
fn cidr_parses_example_block() {
    let cidr = Ipv4Cidr::parse("10.240.0.0/24").unwrap();
    assert_eq!(cidr.network, Ipv4Addr::new(10, 240, 0, 0));
    assert_eq!(cidr.prefix, 24);
    assert_eq!(cidr.address_count(), 256);
}

#[test]
fn cidr_rejects_host_bits() {
    let err = Ipv4Cidr::parse("10.240.0.1/24").unwrap_err();
    assert!(err.contains("host bits"), "got: {err}");
}

#[test]
fn cidr_rejects_bad_syntax() {
    assert!(Ipv4Cidr::parse("10.240.0.0").is_err());
    assert!(Ipv4Cidr::parse("10.240.0/24").is_err());
    assert!(Ipv4Cidr::parse("10.240.0.0/abc").is_err());
    assert!(Ipv4Cidr::parse("300.0.0.0/24").is_err());
}

#[test]
fn cidr_prefix_must_be_plain_digits() {
    for raw in ["10.240.0.0/+24", "10.240.0.0/024", "10.240.0.0/", "10.240.0.0/ 24"] {
        let err = Ipv4Cidr::parse(raw).unwrap_err();
        assert!(err.contains("prefix length"), "{raw}: {err}");
    }
}

#[test]
fn cidr_prefix_bounds() {
    assert!(Ipv4Cidr::parse("10.0.0.0/8").is_ok());
    assert!(Ipv4Cidr::parse("10.240.0.0/29").is_ok());
    assert!(Ipv4Cidr::parse("10.240.0.0/30").is_err());
    assert!(Ipv4Cidr::parse("10.0.0.0/7").is_err());
}

#[test]
fn vpc_names() {
    assert!(validate::vpc_name("pulumi-example-vpc-dev").is_ok());
    assert!(validate::vpc_name("a").is_ok());
    assert!(validate::vpc_name("").is_err());
    assert!(validate::vpc_name("1vpc").is_err());
    assert!(validate::vpc_name("vpc-").is_err());
    assert!(validate::vpc_name("Vpc").is_err());
    assert!(validate::vpc_name("my_vpc").is_err());
    assert!(validate::vpc_name(&"a".repeat(64)).is_err());
}

#[test]
fn resource_group_names() {
    assert!(validate::resource_group_name("pulumi-example-rg-dev").is_ok());
    assert!(validate::resource_group_name("My Group_1").is_ok());
    assert!(validate::resource_group_name(" padded").is_err());
    assert!(validate::resource_group_name("bad/name").is_err());
    assert!(validate::resource_group_name(&"g".repeat(41)).is_err());
}

#[test]
fn zones() {
    assert!(validate::zone("us-south-1").is_ok());
    assert!(validate::zone("eu-de-3").is_ok());
    assert!(validate::zone("us-south-4").is_err());
    assert!(validate::zone("mars-north-1").is_err());
    assert!(validate::zone("us-south").is_err());
}
