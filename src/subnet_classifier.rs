use rusoto_ec2::{Route, RouteTable};
use std::collections::{HashMap, HashSet};

/// Subnets reachable through an Internet Gateway, derived from a region's
/// routing topology.
///
/// A subnet inherits its public/private status from the route table governing
/// it: the table it is explicitly associated with, or failing that the VPC's
/// main table. A table is public when any of its routes targets an `igw-*`
/// gateway.
///
/// `vpc_subnets` maps each VPC to its subnet ids and is consumed as this
/// invocation's unassigned-subnet pool. Explicit associations across all
/// tables claim their subnet out of the pool before any main table sweeps the
/// remainder, so a subnet explicitly held by a private table is never picked
/// up through its VPC's main table, whatever order the tables arrive in. An
/// explicit claim only counts for subnets present in the pool, which keeps the
/// result a subset of the listed subnets.
pub fn classify_public_subnets(
    mut vpc_subnets: HashMap<String, HashSet<String>>,
    route_tables: &[RouteTable],
) -> HashSet<String> {
    let mut candidates: Vec<HashSet<String>> = Vec::with_capacity(route_tables.len());

    for route_table in route_tables {
        let mut explicit = HashSet::new();
        for association in route_table.associations.iter().flatten() {
            let subnet_id = match &association.subnet_id {
                Some(subnet_id) => subnet_id,
                None => continue,
            };
            let pool = route_table
                .vpc_id
                .as_ref()
                .and_then(|vpc_id| vpc_subnets.get_mut(vpc_id));
            if let Some(pool) = pool {
                if pool.remove(subnet_id) {
                    explicit.insert(subnet_id.clone());
                }
            }
        }
        candidates.push(explicit);
    }

    let mut public_subnets = HashSet::new();
    for (route_table, mut candidate) in route_tables.iter().zip(candidates) {
        if is_main_table(route_table) {
            let remaining = route_table
                .vpc_id
                .as_ref()
                .and_then(|vpc_id| vpc_subnets.get(vpc_id));
            if let Some(remaining) = remaining {
                candidate.extend(remaining.iter().cloned());
            }
        }
        if has_internet_route(route_table) {
            public_subnets.extend(candidate);
        }
    }
    public_subnets
}

/// Whether any association entry flags this table as the VPC's main table.
pub fn is_main_table(route_table: &RouteTable) -> bool {
    route_table
        .associations
        .iter()
        .flatten()
        .any(|association| association.main == Some(true))
}

/// Whether any route of the table targets an Internet Gateway.
pub fn has_internet_route(route_table: &RouteTable) -> bool {
    route_table
        .routes
        .iter()
        .flatten()
        .any(is_internet_route)
}

fn is_internet_route(route: &Route) -> bool {
    route
        .gateway_id
        .as_deref()
        .map_or(false, |gateway_id| gateway_id.starts_with("igw-"))
}

#[cfg(test)]
mod tests {
    use crate::subnet_classifier::{classify_public_subnets, has_internet_route, is_main_table};
    use rusoto_ec2::{Route, RouteTable, RouteTableAssociation};
    use std::collections::{HashMap, HashSet};

    fn subnets(vpc_id: &str, subnet_ids: &[&str]) -> HashMap<String, HashSet<String>> {
        let mut vpc_subnets = HashMap::new();
        vpc_subnets.insert(
            vpc_id.to_string(),
            subnet_ids.iter().map(|id| id.to_string()).collect(),
        );
        vpc_subnets
    }

    fn explicit_association(subnet_id: &str) -> RouteTableAssociation {
        RouteTableAssociation {
            subnet_id: Some(subnet_id.to_string()),
            main: Some(false),
            ..RouteTableAssociation::default()
        }
    }

    fn main_association() -> RouteTableAssociation {
        RouteTableAssociation {
            main: Some(true),
            ..RouteTableAssociation::default()
        }
    }

    fn internet_route(gateway_id: &str) -> Route {
        Route {
            destination_cidr_block: Some("0.0.0.0/0".to_string()),
            gateway_id: Some(gateway_id.to_string()),
            ..Route::default()
        }
    }

    fn local_route() -> Route {
        Route {
            destination_cidr_block: Some("10.0.0.0/16".to_string()),
            gateway_id: Some("local".to_string()),
            ..Route::default()
        }
    }

    fn route_table(
        vpc_id: &str,
        associations: Vec<RouteTableAssociation>,
        routes: Vec<Route>,
    ) -> RouteTable {
        RouteTable {
            vpc_id: Some(vpc_id.to_string()),
            associations: Some(associations),
            routes: Some(routes),
            ..RouteTable::default()
        }
    }

    fn set(subnet_ids: &[&str]) -> HashSet<String> {
        subnet_ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_explicit_association_with_internet_route() {
        // Scenario A: subnet-a explicit on an igw table, subnet-b falls to a
        // main table with no internet route
        let tables = vec![
            route_table(
                "vpc-1",
                vec![explicit_association("subnet-a")],
                vec![local_route(), internet_route("igw-x")],
            ),
            route_table("vpc-1", vec![main_association()], vec![local_route()]),
        ];
        let result = classify_public_subnets(subnets("vpc-1", &["subnet-a", "subnet-b"]), &tables);
        assert_eq!(result, set(&["subnet-a"]));
    }

    #[test]
    fn test_implicit_association_with_public_main_table() {
        // Scenario B: the main table routes to an igw, so subnet-b is public too
        let tables = vec![
            route_table(
                "vpc-1",
                vec![explicit_association("subnet-a")],
                vec![internet_route("igw-x")],
            ),
            route_table(
                "vpc-1",
                vec![main_association()],
                vec![local_route(), internet_route("igw-y")],
            ),
        ];
        let result = classify_public_subnets(subnets("vpc-1", &["subnet-a", "subnet-b"]), &tables);
        assert_eq!(result, set(&["subnet-a", "subnet-b"]));
    }

    #[test]
    fn test_table_without_associations_contributes_nothing() {
        // Scenario C: an internet route classifies nothing without candidates
        let tables = vec![route_table(
            "vpc-1",
            vec![],
            vec![internet_route("igw-x")],
        )];
        let result = classify_public_subnets(subnets("vpc-1", &["subnet-a"]), &tables);
        assert_eq!(result, HashSet::new());
    }

    #[test]
    fn test_explicit_private_table_beats_public_main_table() {
        let explicit_private = route_table(
            "vpc-1",
            vec![explicit_association("subnet-a")],
            vec![local_route()],
        );
        let public_main = route_table(
            "vpc-1",
            vec![main_association()],
            vec![internet_route("igw-x")],
        );

        let result = classify_public_subnets(
            subnets("vpc-1", &["subnet-a", "subnet-b"]),
            &[explicit_private.clone(), public_main.clone()],
        );
        assert_eq!(result, set(&["subnet-b"]));

        // same topology with the main table listed first
        let result = classify_public_subnets(
            subnets("vpc-1", &["subnet-a", "subnet-b"]),
            &[public_main, explicit_private],
        );
        assert_eq!(result, set(&["subnet-b"]));
    }

    #[test]
    fn test_vpc_without_main_table_leaves_subnets_unclassified() {
        let tables = vec![route_table(
            "vpc-1",
            vec![explicit_association("subnet-a")],
            vec![internet_route("igw-x")],
        )];
        let result = classify_public_subnets(subnets("vpc-1", &["subnet-a", "subnet-b"]), &tables);
        assert_eq!(result, set(&["subnet-a"]));
    }

    #[test]
    fn test_multiple_internet_routes_are_idempotent() {
        let tables = vec![route_table(
            "vpc-1",
            vec![explicit_association("subnet-a")],
            vec![internet_route("igw-x"), internet_route("igw-y")],
        )];
        let result = classify_public_subnets(subnets("vpc-1", &["subnet-a"]), &tables);
        assert_eq!(result, set(&["subnet-a"]));
    }

    #[test]
    fn test_result_only_contains_listed_subnets() {
        let tables = vec![route_table(
            "vpc-1",
            vec![
                explicit_association("subnet-a"),
                explicit_association("subnet-unlisted"),
            ],
            vec![internet_route("igw-x")],
        )];
        let result = classify_public_subnets(subnets("vpc-1", &["subnet-a"]), &tables);
        assert_eq!(result, set(&["subnet-a"]));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let tables = vec![
            route_table(
                "vpc-1",
                vec![explicit_association("subnet-a")],
                vec![internet_route("igw-x")],
            ),
            route_table("vpc-1", vec![main_association()], vec![local_route()]),
        ];
        let vpc_subnets = subnets("vpc-1", &["subnet-a", "subnet-b"]);
        let first = classify_public_subnets(vpc_subnets.clone(), &tables);
        let second = classify_public_subnets(vpc_subnets, &tables);
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_main_table_scans_all_associations() {
        // the main flag is not required to sit on the first association entry
        let table = route_table(
            "vpc-1",
            vec![explicit_association("subnet-a"), main_association()],
            vec![],
        );
        assert!(is_main_table(&table));
        assert!(!is_main_table(&route_table(
            "vpc-1",
            vec![explicit_association("subnet-a")],
            vec![],
        )));
    }

    #[test]
    fn test_has_internet_route_matches_igw_prefix_only() {
        assert!(has_internet_route(&route_table(
            "vpc-1",
            vec![],
            vec![internet_route("igw-0a1b2c3d")],
        )));
        let vgw_route = Route {
            destination_cidr_block: Some("0.0.0.0/0".to_string()),
            gateway_id: Some("vgw-0a1b2c3d".to_string()),
            ..Route::default()
        };
        assert!(!has_internet_route(&route_table(
            "vpc-1",
            vec![],
            vec![local_route(), vgw_route],
        )));
    }
}
