//! This example extends a base schema document with a separately
//! maintained extension document.

use apollo_compiler::ast::Document;
use apollo_extender::extend;

#[cfg(not(test))]
fn main() {
    print!("{}", extended())
}

fn extended() -> Document {
    let base = Document::parse(
        r#"
        schema { query: Query }

        type Query {
          ticket(id: ID!): Ticket
        }

        type Ticket {
          id: ID!
          title: String!
        }
        "#,
        "base.graphql",
    )
    .unwrap();

    let extension = Document::parse(
        r#"
        extend schema { mutation: Mutation }

        extend type Ticket {
          status: TicketStatus
        }

        type Mutation {
          closeTicket(id: ID!): Ticket
        }

        enum TicketStatus {
          OPEN
          CLOSED
        }
        "#,
        "extension.graphql",
    )
    .unwrap();

    extend(&base, &extension).unwrap()
}

#[test]
fn test_extended() {
    let expected = expect_test::expect![[r#"
        schema {
          query: Query
          mutation: Mutation
        }

        type Query {
          ticket(id: ID!): Ticket
        }

        type Ticket {
          id: ID!
          title: String!
          status: TicketStatus
        }

        type Mutation {
          closeTicket(id: ID!): Ticket
        }

        enum TicketStatus {
          OPEN
          CLOSED
        }
    "#]];
    expected.assert_eq(&extended().to_string());
}
