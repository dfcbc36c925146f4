//! GraphQL operation documents for the Clarke API
//!
//! Operation and field names are the wire contract and must not be renamed.

/// List suppliers, filtered by minimum consumption and paginated.
///
/// `user_id` lets the API annotate each supplier with the requesting
/// user's own review, if any.
pub const GET_SUPPLIERS: &str = "\
query (
  $minKwh: Float,
  $page: Int,
  $limit: Int,
  $user_id: String,
) {
  suppliers(
    minKwh: $minKwh,
    page: $page,
    limit: $limit,
    user_id: $user_id,
  ) {
    id
    name
    email
    logo
    state_origin
    cost_per_kWh
    min_kWh_limit
    total_clients
    avg_rating
    userReview {
      rating
    }
  }
}";

/// Fetch one supplier by id
pub const GET_SUPPLIER_DETAILS: &str = "\
query getSupplierById($id: Int!) {
  getSupplierById(id: $id) {
    id
    name
    email
    logo
    state_origin
    cost_per_kWh
    min_kWh_limit
    total_clients
    avg_rating
  }
}";

/// List every contract held by one user
pub const GET_CONTRACTS_BY_USER_ID: &str = "\
query getAllContractsByUserId($user_id: String!) {
  getAllContractsByUserId(user_id: $user_id) {
    id
    supplier_id
    supplier_name
    user_id
    user_name
    isActive
    cost_per_kWh
    user_kWh_month
    created_at
  }
}";

/// List contracts against one supplier, paginated
pub const GET_CONTRACTS_BY_SUPPLIER_ID: &str = "\
query getAllContractsBySupplierId(
  $supplier_id: Int!,
  $page: Int,
  $limit: Int,
) {
  getAllContractsBySupplierId(
    supplier_id: $supplier_id,
    page: $page,
    limit: $limit,
  ) {
    id
    supplier_id
    supplier_name
    user_id
    user_name
    isActive
    cost_per_kWh
    user_kWh_month
    created_at
  }
}";

/// Register a new user account
pub const CREATE_USER: &str = "\
mutation createUser($input: CreateUserDto!) {
  createUser(createUserDto: $input) {
    user {
      id
      name
      email
      cpf
    }
    token
  }
}";

/// Log a user in with email and password
pub const LOGIN_USER: &str = "\
mutation loginUser($input: LoginUserDto!) {
  loginUser(loginUserDto: $input) {
    user {
      id
      name
      email
      cpf
    }
    token
  }
}";

/// Update a user's account details
pub const UPDATE_USER: &str = "\
mutation updateUser($input: UpdateUserDto!) {
  updateUser(updateUserDto: $input) {
    id
    name
    email
    cpf
  }
}";

/// Register a new supplier account
pub const CREATE_SUPPLIER: &str = "\
mutation createSupplier($input: CreateSupplierDto!) {
  createSupplier(createSupplierDto: $input) {
    supplier {
      id
      name
      email
      logo
      state_origin
      cost_per_kWh
      min_kWh_limit
      total_clients
      avg_rating
    }
    token
  }
}";

/// Log a supplier in with email and password
pub const LOGIN_SUPPLIER: &str = "\
mutation loginSupplier($input: SupplierLoginDto!) {
  loginSupplier(supplierLoginDto: $input) {
    supplier {
      id
      name
      email
      logo
      state_origin
      cost_per_kWh
      min_kWh_limit
      total_clients
      avg_rating
    }
    token
  }
}";

/// Update a supplier's own profile
pub const UPDATE_SUPPLIER: &str = "\
mutation updateSupplier($id: Int!, $input: UpdateSupplierDto!) {
  updateSupplier(id: $id, updateSupplierDto: $input) {
    id
    name
    logo
    state_origin
    cost_per_kWh
    min_kWh_limit
    total_clients
    avg_rating
  }
}";

/// Sign a contract between a user and a supplier
pub const CREATE_CONTRACT: &str = "\
mutation createContract($input: CreateContractInput!) {
  createContract(createContractInput: $input) {
    id
    supplier_id
    user_id
    isActive
    cost_per_kWh
    user_kWh_month
    created_at
  }
}";

/// Deactivate a contract by id (a state transition, not a deletion)
pub const DEACTIVATE_CONTRACT: &str = "\
mutation deactivateContract($id: Int!) {
  deactivateContract(id: $id) {
    id
    supplier_id
    user_id
    isActive
    cost_per_kWh
    user_kWh_month
    created_at
  }
}";

/// Create (or overwrite) a user's review of a supplier
pub const CREATE_REVIEW: &str = "\
mutation createReview($createReviewInput: CreateReviewInput!) {
  createReview(createReviewInput: $createReviewInput) {
    id
    user_id
    supplier_id
    rating
    createdAt
    updatedAt
  }
}";
