use federation_composition::{ErrorCode, Subgraphs, compose};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn compose_subgraphs(subgraphs: &[(&str, &str)]) -> federation_composition::CompositionResult {
    let mut ingested = Subgraphs::default();

    for (name, sdl) in subgraphs {
        ingested.ingest_str(sdl, name, Some(&format!("http://{name}.example.com")));
    }

    compose(&ingested)
}

#[test]
fn single_subgraph_supergraph() {
    let result = compose_subgraphs(&[(
        "a",
        indoc! {r#"
            extend schema
              @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

            type Query {
              product: Product
            }

            type Product @key(fields: "id") {
              id: ID!
              name: String!
            }
        "#},
    )]);

    let supergraph = result.into_result().unwrap();

    let expected = indoc! {r#"
        schema
          @link(url: "https://specs.apollo.dev/link/v1.0")
          @link(url: "https://specs.apollo.dev/join/v0.3", for: EXECUTION)
        {
          query: Query
        }

        directive @join__enumValue(graph: join__Graph!) repeatable on ENUM_VALUE

        directive @join__field(graph: join__Graph, requires: join__FieldSet, provides: join__FieldSet, type: String, external: Boolean, override: String, usedOverridden: Boolean) repeatable on FIELD_DEFINITION | INPUT_FIELD_DEFINITION

        directive @join__graph(name: String!, url: String!) on ENUM_VALUE

        directive @join__implements(graph: join__Graph!, interface: String!) repeatable on OBJECT | INTERFACE

        directive @join__type(graph: join__Graph!, key: join__FieldSet, extension: Boolean! = false, resolvable: Boolean! = true, isInterfaceObject: Boolean! = false) repeatable on OBJECT | INTERFACE | UNION | ENUM | INPUT_OBJECT | SCALAR

        directive @join__unionMember(graph: join__Graph!, member: String!) repeatable on UNION

        directive @link(url: String, as: String, for: link__Purpose, import: [link__Import]) repeatable on SCHEMA

        scalar join__FieldSet

        scalar link__Import

        enum link__Purpose {
          """
          `SECURITY` features provide metadata necessary to securely resolve fields.
          """
          SECURITY

          """
          `EXECUTION` features provide metadata necessary for operation execution.
          """
          EXECUTION
        }

        enum join__Graph {
          A @join__graph(name: "a", url: "http://a.example.com")
        }

        type Query
          @join__type(graph: A)
        {
          product: Product
        }

        type Product
          @join__type(graph: A, key: "id")
        {
          id: ID!
          name: String!
        }
    "#};

    assert_eq!(supergraph.supergraph_sdl(), expected);
}

#[test]
fn join_field_is_elided_when_it_would_only_repeat_the_graph() {
    let result = compose_subgraphs(&[(
        "inventory",
        indoc! {r#"
            extend schema
              @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

            type Query {
              warehouses: [Warehouse!]!
            }

            type Warehouse @key(fields: "id") {
              id: ID!
              city: String
            }
        "#},
    )]);

    let supergraph = result.into_result().unwrap();

    assert!(!supergraph.supergraph_sdl().contains("@join__field"));
}

#[test]
fn output_types_merge_to_the_most_nullable_rendering() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@shareable"])

                type Query {
                  product: Product
                }

                type Product @key(fields: "id") {
                  id: ID!
                  tags: [String!]! @shareable
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@shareable"])

                type Product @key(fields: "id") {
                  id: ID!
                  tags: [String] @shareable
                }
            "#},
        ),
    ]);

    let supergraph = result.into_result().unwrap();
    let sdl = supergraph.supergraph_sdl();

    assert!(
        sdl.contains(
            r#"tags: [String] @join__field(graph: A, type: "[String!]!") @join__field(graph: B, type: "[String]")"#
        ),
        "{sdl}"
    );
}

#[test]
fn cost_weight_takes_the_max_across_subgraphs_and_respects_aliases() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.9", import: ["@key", "@shareable"])
                  @link(url: "https://specs.apollo.dev/cost/v0.1", import: ["@cost"])

                type Query {
                  product: Product
                }

                type Product @key(fields: "id") {
                  id: ID!
                  picture: String @shareable @cost(weight: 5)
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.9", import: ["@key", "@shareable"])
                  @link(url: "https://specs.apollo.dev/cost/v0.1", import: [{name: "@cost", as: "@price"}])

                type Product @key(fields: "id") {
                  id: ID!
                  expensive: String @price(weight: 8)
                }
            "#},
        ),
    ]);

    let supergraph = result.into_result().unwrap();
    let sdl = supergraph.supergraph_sdl();

    assert!(
        sdl.contains("picture: String @join__field(graph: A) @cost(weight: 5)"),
        "{sdl}"
    );
    assert!(
        sdl.contains("expensive: String @join__field(graph: B) @cost(weight: 8)"),
        "{sdl}"
    );
    assert!(sdl.contains(r#"@link(url: "https://specs.apollo.dev/cost/v0.1", import: ["@cost", "@listSize"])"#));
}

#[test]
fn list_size_merges_by_union_and_prefers_not_requiring_a_slicing_argument() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.9", import: ["@key", "@shareable"])
                  @link(url: "https://specs.apollo.dev/cost/v0.1", import: ["@listSize"])

                type Query {
                  product: Product
                }

                type Product @key(fields: "id") {
                  id: ID!
                  reviews(first: Int): [String!] @shareable @listSize(assumedSize: 10, slicingArguments: ["first"])
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.9", import: ["@key", "@shareable"])
                  @link(url: "https://specs.apollo.dev/cost/v0.1", import: ["@listSize"])

                type Product @key(fields: "id") {
                  id: ID!
                  reviews(last: Int): [String!] @shareable @listSize(slicingArguments: ["last"], requireOneSlicingArgument: false)
                }
            "#},
        ),
    ]);

    let supergraph = result.into_result().unwrap();
    let sdl = supergraph.supergraph_sdl();

    assert!(
        sdl.contains(r#"@listSize(assumedSize: 10, slicingArguments: ["first", "last"], requireOneSlicingArgument: false)"#),
        "{sdl}"
    );
}

#[test]
fn override_with_label_is_reflected_on_both_sides() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.7", import: ["@key"])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") {
                  id: ID!
                  price: Int
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.7", import: ["@key", "@override"])

                type Product @key(fields: "id") {
                  id: ID!
                  price: Int @override(from: "a", label: "percent(25)")
                }
            "#},
        ),
    ]);

    let supergraph = result.into_result().unwrap();
    let sdl = supergraph.supergraph_sdl();

    assert!(sdl.contains(r#"@link(url: "https://specs.apollo.dev/join/v0.4", for: EXECUTION)"#));
    assert!(
        sdl.contains(r#"@join__field(graph: B, override: "a", overrideLabel: "percent(25)")"#),
        "{sdl}"
    );
    assert!(
        sdl.contains(r#"@join__field(graph: A, overrideLabel: "percent(25)")"#),
        "{sdl}"
    );
}

#[test]
fn invalid_override_label_is_rejected() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.7", import: ["@key"])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") {
                  id: ID!
                  price: Int
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.7", import: ["@key", "@override"])

                type Product @key(fields: "id") {
                  id: ID!
                  price: Int @override(from: "a", label: "1nope")
                }
            "#},
        ),
    ]);

    let diagnostics = result.into_result().unwrap_err();
    let error = diagnostics.iter_errors().next().unwrap();

    assert_eq!(error.code(), Some(ErrorCode::OverrideLabelInvalid));
    assert!(error.message().contains(r#"Invalid @override label "1nope" on field "Product.price""#));
}

#[test]
fn requires_condition_that_cannot_be_fulfilled_fails_satisfiability() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") {
                  id: ID!
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@external", "@requires"])

                type Product @key(fields: "id") {
                  id: ID!
                  weight: Int @external
                  shipping: Int @requires(fields: "weight")
                }
            "#},
        ),
    ]);

    let diagnostics = result.into_result().unwrap_err();

    assert!(
        diagnostics
            .iter_messages()
            .any(|message| message == r#"[b] cannot satisfy @require conditions on field "Product.shipping"."#),
        "{:?}",
        diagnostics.iter_messages().collect::<Vec<_>>()
    );

    assert!(
        diagnostics
            .iter_errors()
            .all(|error| error.code() == Some(ErrorCode::SatisfiabilityError))
    );
}

#[test]
fn entity_fields_resolve_through_key_jumps() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") {
                  id: ID!
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

                type Product @key(fields: "id") {
                  id: ID!
                  inStock: Boolean!
                }
            "#},
        ),
    ]);

    assert!(!result.diagnostics().any_fatal(), "{:?}", result.diagnostics().iter_messages().collect::<Vec<_>>());
}

#[test]
fn field_unreachable_from_one_subgraph_fails_satisfiability() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@shareable"])

                type Query {
                  aProducts: [Product]
                }

                type Product {
                  id: ID! @shareable
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@shareable"])

                type Query {
                  bProducts: [Product]
                }

                type Product {
                  id: ID! @shareable
                  reviews: [String!]!
                }
            "#},
        ),
    ]);

    let diagnostics = result.into_result().unwrap_err();

    assert!(
        diagnostics.iter_messages().any(|message| {
            message
                == r#"[a] cannot move to subgraph "b", which has field "Product.reviews", because type "Product" has no @key defined in subgraph "b"."#
        }),
        "{:?}",
        diagnostics.iter_messages().collect::<Vec<_>>()
    );

    assert!(
        diagnostics
            .iter_errors()
            .all(|error| error.code() == Some(ErrorCode::SatisfiabilityError))
    );
}

#[test]
fn query_root_fields_can_live_in_different_subgraphs() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

                type Query {
                  hello: String
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key"])

                type Query {
                  world: String
                }
            "#},
        ),
    ]);

    assert!(
        !result.diagnostics().any_fatal(),
        "{:?}",
        result.diagnostics().iter_messages().collect::<Vec<_>>()
    );
}

#[test]
fn override_label_with_requires_resolves_through_the_overridden_graph() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.7", import: ["@key"])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") {
                  id: ID!
                  price: Int
                  weight: Int
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.7", import: ["@key", "@override", "@external", "@requires"])

                type Product @key(fields: "id") {
                  id: ID!
                  price: Int @override(from: "a", label: "percent(25)")
                  weight: Int @external
                  shipping: Int @requires(fields: "weight")
                }
            "#},
        ),
    ]);

    let supergraph = result.into_result().unwrap();
    let sdl = supergraph.supergraph_sdl();

    assert!(
        sdl.contains(r#"shipping: Int @join__field(graph: B, requires: "weight")"#),
        "{sdl}"
    );
    assert!(
        sdl.contains(r#"@join__field(graph: B, override: "a", overrideLabel: "percent(25)")"#),
        "{sdl}"
    );
    assert!(
        sdl.contains(r#"@join__field(graph: A, overrideLabel: "percent(25)")"#),
        "{sdl}"
    );
}

#[test]
fn mismatched_link_import_names_are_rejected() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", {name: "@tag", as: "@label"}])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") {
                  id: ID!
                  name: String @label(name: "public")
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@tag"])

                type Product @key(fields: "id") {
                  id: ID!
                  sku: String @tag(name: "public")
                }
            "#},
        ),
    ]);

    let diagnostics = result.into_result().unwrap_err();
    let error = diagnostics
        .iter_errors()
        .find(|error| error.code() == Some(ErrorCode::LinkImportNameMismatch))
        .unwrap();

    assert!(
        error
            .message()
            .contains(r#"The import name "@tag" is imported with mismatched name between subgraphs"#),
        "{}",
        error.message()
    );
}

#[test]
fn diagnostics_serialize_with_their_error_code() {
    let result = compose_subgraphs(&[
        (
            "a",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: [{name: "@tag", as: "@label"}])

                type Query {
                  hello: String
                }
            "#},
        ),
        (
            "b",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@tag"])

                type Query {
                  world: String
                }
            "#},
        ),
    ]);

    let error = result.diagnostics().iter_errors().next().unwrap();
    let json = serde_json::to_value(error).unwrap();

    assert_eq!(json["extensions"]["code"], "LINK_IMPORT_NAME_MISMATCH");
    assert!(json["message"].is_string());
}

#[test]
fn composition_is_deterministic() {
    let subgraphs = [
        (
            "products",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@shareable", "@tag"])

                type Query {
                  products: [Product!]!
                }

                type Product @key(fields: "id") @tag(name: "public") {
                  id: ID!
                  name: String @shareable
                }
            "#},
        ),
        (
            "reviews",
            indoc! {r#"
                extend schema
                  @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@shareable"])

                type Product @key(fields: "id") {
                  id: ID!
                  name: String @shareable
                  reviews: [Review!]!
                }

                type Review {
                  body: String!
                }
            "#},
        ),
    ];

    let first = compose_subgraphs(&subgraphs).into_result().unwrap();
    let second = compose_subgraphs(&subgraphs).into_result().unwrap();

    assert_eq!(first.supergraph_sdl(), second.supergraph_sdl());
    assert_eq!(first.api_sdl(), second.api_sdl());
}

#[test]
fn api_sdl_hides_inaccessible_elements_and_machinery() {
    let result = compose_subgraphs(&[(
        "a",
        indoc! {r#"
            extend schema
              @link(url: "https://specs.apollo.dev/federation/v2.3", import: ["@key", "@inaccessible"])

            type Query {
              product: Product
              internal: Secret @inaccessible
            }

            type Product @key(fields: "id") {
              id: ID!
              name: String! @deprecated(reason: "use title")
              title: String!
            }

            type Secret @inaccessible {
              value: String
            }
        "#},
    )]);

    let supergraph = result.into_result().unwrap();
    let api = supergraph.api_sdl();

    assert!(!api.contains("Secret"), "{api}");
    assert!(!api.contains("internal"), "{api}");
    assert!(!api.contains("join__"), "{api}");
    assert!(!api.contains("@inaccessible"), "{api}");
    assert!(api.contains(r#"name: String! @deprecated(reason: "use title")"#), "{api}");
}
