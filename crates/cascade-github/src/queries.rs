//! GraphQL documents sent to the GitHub API.

pub(crate) const PROJECT_SCHEMA: &str = r"
query ProjectSchema($org: String!, $number: Int!) {
  organization(login: $org) {
    projectV2(number: $number) {
      id
      fields(first: 100) {
        nodes {
          ... on ProjectV2FieldCommon { id name dataType }
          ... on ProjectV2SingleSelectField { options { id name } }
        }
      }
    }
  }
}";

pub(crate) const PROJECT_ITEMS: &str = r"
query ProjectItems($org: String!, $number: Int!, $first: Int!, $after: String) {
  organization(login: $org) {
    projectV2(number: $number) {
      items(first: $first, after: $after) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          content { ... on Issue { id } }
          fieldValues(first: 100) {
            nodes {
              ... on ProjectV2ItemFieldSingleSelectValue {
                optionId
                field { ... on ProjectV2FieldCommon { name } }
              }
            }
          }
        }
      }
    }
  }
}";

pub(crate) const RECORD_PARENT: &str = r"
query RecordParent($id: ID!) {
  node(id: $id) {
    ... on Issue {
      parent { id issueType { name } }
    }
  }
}";

pub(crate) const SET_FIELD_OPTION: &str = r"
mutation SetFieldOption($project: ID!, $item: ID!, $field: ID!, $option: String!) {
  updateProjectV2ItemFieldValue(
    input: { projectId: $project, itemId: $item, fieldId: $field, value: { singleSelectOptionId: $option } }
  ) {
    projectV2Item { id }
  }
}";
