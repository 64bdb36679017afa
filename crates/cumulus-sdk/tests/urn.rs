use cumulus_sdk::Urn;

#[test]
fn display_matches_pulumi_format() {
    let urn = Urn::new(
        "dev",
        "ibmcloud-examples",
        "ibmcloud:index/isVpc:IsVpc",
        "example-vpc",
    );
    assert_eq!(
        urn.to_string(),
        "urn:pulumi:dev::ibmcloud-examples::ibmcloud:index/isVpc:IsVpc::example-vpc"
    );
}

#[test]
fn parse_inverts_display() {
    let raw = "urn:pulumi:prod::proj::ibmcloud:index/isSubnet:IsSubnet::example-subnet";
    let urn: Urn = raw.parse().unwrap();
    assert_eq!(urn.stack, "prod");
    assert_eq!(urn.project, "proj");
    assert_eq!(urn.type_token, "ibmcloud:index/isSubnet:IsSubnet");
    assert_eq!(urn.name, "example-subnet");
}

#[test]
fn name_may_contain_separator() {
    let urn: Urn = "urn:pulumi:dev::proj::t:index:T::a::b".parse().unwrap();
    assert_eq!(urn.name, "a::b");
}

#[test]
fn rejects_malformed() {
    assert!("pulumi:dev::proj::t::n".parse::<Urn>().is_err());
    assert!("urn:pulumi:dev::proj::t".parse::<Urn>().is_err());
    assert!("urn:pulumi:dev::::t::n".parse::<Urn>().is_err());
}

#[test]
fn serializes_as_string() {
    let urn = Urn::new("dev", "proj", "t:index:T", "n");
    let json = serde_json::to_string(&urn).unwrap();
    assert_eq!(json, "\"urn:pulumi:dev::proj::t:index:T::n\"");
    let back: Urn = serde_json::from_str(&json).unwrap();
    assert_eq!(back, urn);
}
